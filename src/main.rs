//! FTP decoy - Entry Point
//!
//! Loads the service configuration, binds the listener and logs every event
//! as JSON.

use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;

use ftp_decoy::Server;
use ftp_decoy::error::ServerError;
use ftp_decoy::tracer::LogTracer;

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG still overrides the default level
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Launching FTP decoy...");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let server = Server::bind_from_config(Arc::new(LogTracer)).await?;
    server.start().await;
    Ok(())
}
