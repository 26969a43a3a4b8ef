//! Configuration module for the hookseal CLI.
//!
//! Loads the TOML config file and applies the secret override coming from
//! the command line or the `HOOKSEAL_SECRET` environment variable.

pub mod file;

use crate::config::file::FileConfig;
use hookseal_sdk::WebhookSecret;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("no webhook secret configured (set [webhook].secret, --secret or HOOKSEAL_SECRET)")]
    MissingSecret,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub secret: Option<WebhookSecret>,
    pub require_signature: bool,
}

impl LoadedConfig {
    /// The configured secret, or [`ConfigError::MissingSecret`].
    pub fn require_secret(&self) -> Result<&WebhookSecret, ConfigError> {
        self.secret.as_ref().ok_or(ConfigError::MissingSecret)
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    secret_override: Option<String>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, secret_override: Option<String>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            secret_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// A missing config file is not an error; defaults are used and the
    /// secret must then come from the override.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let mut file_config = self.read_file()?;

        if let Some(secret) = &self.secret_override {
            file_config.webhook.secret = Some(secret.clone());
        }

        self.validate(&file_config)?;

        Ok(LoadedConfig {
            secret: file_config.webhook.secret.map(WebhookSecret::from),
            require_signature: file_config.webhook.require_signature,
        })
    }

    fn read_file(&self) -> Result<FileConfig, ConfigError> {
        match std::fs::read_to_string(&self.config_path) {
            Ok(content) => {
                tracing::debug!("Configuration loaded from {:?}", self.config_path);
                Ok(toml::from_str(&content)?)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "No config file at {:?}, using defaults",
                    self.config_path
                );
                Ok(FileConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.webhook.secret.as_deref() == Some("") {
            return Err(ConfigError::ValidationError(
                "webhook secret must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
