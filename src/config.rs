//! Configuration management for the FTP decoy
//!
//! Layers built-in defaults, an optional `config.toml` and `FTP_DECOY_*`
//! environment variables into a read-only [`ServiceConfig`].

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;
use std::time::Duration;

/// Banner sent when the configuration does not provide one
pub const DEFAULT_BANNER: &str = "220 FTP Server Ready";

const DEFAULT_ADDRESS: &str = "0.0.0.0:2121";
const DEFAULT_DEADLINE_SECS: i64 = 60;
const DEFAULT_MAX_COMMAND_LENGTH: i64 = 4096;
const ENV_PREFIX: &str = "FTP_DECOY";

/// Immutable settings of one decoy listener
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Address the control listener binds, e.g. `0.0.0.0:21`
    pub address: String,

    /// Greeting line sent on connect. Empty means [`DEFAULT_BANNER`].
    pub banner: String,

    /// Free text copied into every emitted event
    pub description: String,

    /// Absolute lifetime of a session, set once when the connection is accepted
    pub deadline_timeout_seconds: u64,

    /// Longest command line kept, terminator included.
    ///
    /// A longer line is answered with `500 Command too long` in place of the
    /// reply its verb would otherwise get from the command table.
    pub max_command_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            banner: String::new(),
            description: String::new(),
            deadline_timeout_seconds: DEFAULT_DEADLINE_SECS as u64,
            max_command_length: DEFAULT_MAX_COMMAND_LENGTH as usize,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        // Production layout first, then the working directory
        let config_paths = ["ftp-decoy/config", "config"];

        let mut builder = Self::defaults()?;
        for config_path in config_paths {
            builder = builder.add_source(File::with_name(config_path).required(false));
        }

        Self::finish(builder)
    }

    /// Load configuration from an in-memory TOML document with environment overrides
    pub fn from_toml(document: &str) -> Result<Self, config::ConfigError> {
        let builder = Self::defaults()?.add_source(File::from_str(document, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Banner line without terminator, falling back to [`DEFAULT_BANNER`]
    pub fn banner_line(&self) -> &str {
        if self.banner.is_empty() {
            DEFAULT_BANNER
        } else {
            &self.banner
        }
    }

    /// Session deadline as Duration
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_timeout_seconds)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        Config::builder()
            .set_default("address", DEFAULT_ADDRESS)?
            .set_default("banner", "")?
            .set_default("description", "")?
            .set_default("deadline_timeout_seconds", DEFAULT_DEADLINE_SECS)?
            .set_default("max_command_length", DEFAULT_MAX_COMMAND_LENGTH)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, config::ConfigError> {
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        let config: ServiceConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.address.trim().is_empty() {
            return Err(config::ConfigError::Message("address cannot be empty".into()));
        }

        if self.deadline_timeout_seconds == 0 {
            return Err(config::ConfigError::Message(
                "deadline_timeout_seconds must be greater than 0".into(),
            ));
        }

        if self.max_command_length == 0 {
            return Err(config::ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_overrides_defaults() {
        let config = ServiceConfig::from_toml(
            r#"
            address = "127.0.0.1:2221"
            banner = "220 ProFTPD Server"
            description = "edge decoy"
            deadline_timeout_seconds = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.address, "127.0.0.1:2221");
        assert_eq!(config.banner_line(), "220 ProFTPD Server");
        assert_eq!(config.description, "edge decoy");
        assert_eq!(config.deadline(), Duration::from_secs(15));
        assert_eq!(config.max_command_length, 4096);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ServiceConfig::from_toml("").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.banner_line(), DEFAULT_BANNER);
    }

    #[test]
    fn test_zero_deadline_rejected() {
        let err = ServiceConfig::from_toml("deadline_timeout_seconds = 0").unwrap_err();
        assert!(err.to_string().contains("deadline_timeout_seconds"));
    }

    #[test]
    fn test_empty_address_rejected() {
        assert!(ServiceConfig::from_toml("address = \"  \"").is_err());
    }
}
