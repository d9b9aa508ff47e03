//! Error types
//!
//! Defines the errors that can stop the decoy service from starting.
//! Per-session failures never leave the session handler and have no type here.

use std::fmt;
use std::io;

/// Errors raised while starting the FTP decoy service
#[derive(Debug)]
pub enum ServerError {
    /// The configured address could not be bound
    Bind { address: String, source: io::Error },
    /// The configuration could not be loaded or failed validation
    Config(config::ConfigError),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Bind { address, source } => {
                write!(f, "Failed to bind to {}: {}", address, source)
            }
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Bind { source, .. } => Some(source),
            ServerError::Config(e) => Some(e),
        }
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_display() {
        let err = ServerError::Bind {
            address: "127.0.0.1:21".into(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "address in use"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to bind to 127.0.0.1:21: address in use"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ServerError = config::ConfigError::Message("bad".into()).into();
        assert!(matches!(err, ServerError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: bad");
    }
}
