//! Configuration loading and logging initialization.
//!
//! Configuration comes from a TOML file ([`Config::load`]) or from environment
//! variables ([`Config::from_env`], `.env` files honored via dotenvy). Both
//! paths validate before returning, so a constructed [`Config`] is always
//! usable.

use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Environment variable naming the record store base URL.
pub const ENV_STORE_URL: &str = "CONVENIOS_STORE_URL";
/// Environment variable naming the record store API key.
pub const ENV_STORE_API_KEY: &str = "CONVENIOS_STORE_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the managed record store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// API key, sent as both `apikey` and bearer token.
    pub api_key: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from environment variables, honoring `.env` files.
    ///
    /// Reads [`ENV_STORE_URL`] and [`ENV_STORE_API_KEY`]; logging settings
    /// keep their defaults and can still be overridden via `RUST_LOG`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let url = std::env::var(ENV_STORE_URL).map_err(|_| ConfigError::MissingField {
            field: ENV_STORE_URL,
        })?;
        let api_key = std::env::var(ENV_STORE_API_KEY).map_err(|_| ConfigError::MissingField {
            field: ENV_STORE_API_KEY,
        })?;

        let config = Config {
            store: StoreConfig { url, api_key },
            logging: LoggingConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.store.api_key.is_empty() {
            return Err(ConfigError::MissingField { field: "store.api_key" });
        }
        url::Url::parse(&self.store.url).map_err(|e| ConfigError::InvalidValue {
            field: "store.url",
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// Initialize the tracing subscriber from the logging section.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}
