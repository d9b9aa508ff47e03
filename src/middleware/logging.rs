//! Logging middleware
//!
//! Operator-facing log lines for session lifecycle. Attacker activity itself
//! is recorded through the tracer; these are for whoever runs the decoy.

use log::{debug, info};
use std::io;

use crate::client::Session;

/// Log a client connection
pub fn log_connection(session: &Session) {
    info!("Client connected: {} (session {})", session.remote_addr(), session.id());
}

/// Log a client command
pub fn log_command(session: &Session, command: &str) {
    info!("Client {} sent: {}", session.remote_addr(), command.escape_debug());
}

/// Log why a session stopped reading or writing
pub fn log_session_error(session: &Session, err: &io::Error) {
    debug!("Session {} stopped: {}", session.id(), err);
}

/// Log a client disconnection
pub fn log_disconnect(session: &Session) {
    info!("Client {} disconnected (session {})", session.remote_addr(), session.id());
}
