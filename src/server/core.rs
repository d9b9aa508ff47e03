use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::client::handle_client;
use crate::config::ServiceConfig;
use crate::error::ServerError;
use crate::tracer::Tracer;

/// Accepts connections for one decoy service and runs a session per connection.
///
/// Sessions share nothing but the read-only configuration and the tracer.
pub struct Server {
    listener: TcpListener,
    config: Arc<ServiceConfig>,
    tracer: Arc<dyn Tracer>,
}

impl Server {
    /// Binds the configured address. Bind failures are returned, never retried.
    pub async fn bind(config: ServiceConfig, tracer: Arc<dyn Tracer>) -> Result<Self, ServerError> {
        let listener = match TcpListener::bind(&config.address).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Error during init FTP Protocol on {}: {}", config.address, e);
                return Err(ServerError::Bind {
                    address: config.address.clone(),
                    source: e,
                });
            }
        };

        info!(
            "Init service FTP on {} (banner: {:?})",
            config.address,
            config.banner_line()
        );

        Ok(Self {
            listener,
            config: Arc::new(config),
            tracer,
        })
    }

    /// Loads `config.toml` plus environment overrides and binds the result.
    pub async fn bind_from_config(tracer: Arc<dyn Tracer>) -> Result<Self, ServerError> {
        let config = ServiceConfig::load()?;
        Self::bind(config, tracer).await
    }

    /// Binds a service described by an in-memory TOML document.
    pub async fn bind_toml(document: &str, tracer: Arc<dyn Tracer>) -> Result<Self, ServerError> {
        let config = ServiceConfig::from_toml(document)?;
        Self::bind(config, tracer).await
    }

    /// Returns the address actually bound, useful when binding port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever. A failed accept is logged and skipped.
    pub async fn start(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let config = Arc::clone(&self.config);
                    let tracer = Arc::clone(&self.tracer);

                    // Spawn a task for each client so accept loop doesn't block
                    tokio::spawn(async move {
                        handle_client(stream, addr, &config, tracer.as_ref()).await;
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::LogTracer;

    fn config(address: &str) -> ServiceConfig {
        ServiceConfig {
            address: address.into(),
            ..ServiceConfig::default()
        }
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let server = Server::bind(config("127.0.0.1:0"), Arc::new(LogTracer))
            .await
            .unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_conflict_is_reported() {
        let first = Server::bind(config("127.0.0.1:0"), Arc::new(LogTracer))
            .await
            .unwrap();
        let taken = first.local_addr().unwrap().to_string();

        let err = Server::bind(config(&taken), Arc::new(LogTracer))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ServerError::Bind { ref address, .. } if *address == taken));
    }

    #[tokio::test]
    async fn test_bind_toml() {
        let server = Server::bind_toml("address = \"127.0.0.1:0\"", Arc::new(LogTracer))
            .await
            .unwrap();
        assert!(server.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_invalid_config_is_reported_before_binding() {
        let result = Server::bind_toml(
            "address = \"127.0.0.1:0\"\ndeadline_timeout_seconds = 0",
            Arc::new(LogTracer),
        )
        .await;
        assert!(matches!(result, Err(ServerError::Config(_))));

        let result = Server::bind_toml("address = [", Arc::new(LogTracer)).await;
        assert!(matches!(result, Err(ServerError::Config(_))));
    }

    #[tokio::test]
    async fn test_bind_invalid_address() {
        let result = Server::bind(config("not-an-address"), Arc::new(LogTracer)).await;
        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }
}
