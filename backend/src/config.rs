//! Server configuration, read from the environment (and an optional `.env`).

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Default server host binding.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default SQLite database file.
pub const DEFAULT_DATABASE_PATH: &str = "roster.sqlite";

/// Default directory for temporary uploaded files.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Default upload size ceiling (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("{0}")]
    Rejected(String),
}

/// Limits and location used by the upload transport.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub dir: PathBuf,
    pub max_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub uploads: UploadSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            uploads: UploadSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment and defaults.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = ServerConfig::default();
        let config = ServerConfig {
            host: env_or("ROSTER_HOST", defaults.host)?,
            port: env_or("ROSTER_PORT", defaults.port)?,
            database_path: env_or("ROSTER_DATABASE_PATH", defaults.database_path)?,
            uploads: UploadSettings {
                dir: env_or("ROSTER_UPLOAD_DIR", defaults.uploads.dir)?,
                max_bytes: env_or("ROSTER_MAX_UPLOAD_BYTES", defaults.uploads.max_bytes)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Rejected(
                "Server port must be greater than 0".to_string(),
            ));
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Rejected(
                "Database path cannot be empty".to_string(),
            ));
        }
        if self.uploads.max_bytes == 0 {
            return Err(ConfigError::Rejected(
                "Upload size limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.uploads.max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn zero_port_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Rejected(_))));
    }

    #[test]
    fn zero_upload_limit_is_rejected() {
        let mut config = ServerConfig::default();
        config.uploads.max_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_database_path_is_rejected() {
        let config = ServerConfig {
            database_path: PathBuf::new(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
