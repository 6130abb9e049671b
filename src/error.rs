use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// A remote store call failed.
///
/// Every variant is transient from this layer's point of view: the call is not
/// retried, local state is left untouched, and the error surfaces to the
/// caller exactly once.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store returned status {status} for table '{table}': {body}")]
    UnexpectedStatus {
        table: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode '{table}' response: {source}")]
    Decode {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("store returned no row for '{table}' insert")]
    MissingReturnedRow { table: &'static str },

    #[error("connection error: {0}")]
    Connection(String),
}

/// Malformed user input in auxiliary flows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid email address '{input}': {reason}")]
    InvalidEmail { input: String, reason: &'static str },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, Error>;
