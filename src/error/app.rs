use thiserror::Error;

use super::{ConfigError, HttpError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
    #[error("HTTP client error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("Worker permit error: {source}")]
    Permit {
        #[from]
        source: tokio::sync::AcquireError,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    /// Returns true when the error came from the network layer rather than
    /// from decoding or validating a response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        match self {
            AppError::Reqwest { source } => {
                source.is_connect() || source.is_timeout() || source.is_request()
            }
            AppError::Io { .. }
            | AppError::Clap { .. }
            | AppError::Json { .. }
            | AppError::Toml { .. }
            | AppError::Join { .. }
            | AppError::Permit { .. }
            | AppError::Validation(_)
            | AppError::Config(_)
            | AppError::Http(_) => false,
        }
    }
}
