// src/error.rs

//! Unified error handling for the notifier.

use std::fmt;

use thiserror::Error;

/// Result type alias for notifier operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream archive read failed (network, status, or body)
    #[error("Fetch error for {endpoint}: {message}")]
    Fetch { endpoint: String, message: String },

    /// Push delivery failed for a single show
    #[error("Dispatch error for show {media_id}: {message}")]
    Dispatch { media_id: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a fetch error for an upstream endpoint.
    pub fn fetch(endpoint: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }

    /// Create a dispatch error for a show.
    pub fn dispatch(media_id: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Dispatch {
            media_id: media_id.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error must stop the process.
    ///
    /// Only configuration-class errors are fatal, and only at startup.
    /// Everything raised while polling is logged and recovered.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Toml(_) | Self::Url(_) | Self::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_config_errors_are_fatal() {
        assert!(AppError::config("missing key").is_fatal());
        assert!(!AppError::fetch("years", "timed out").is_fatal());
        assert!(!AppError::dispatch("42", "503").is_fatal());
    }

    #[test]
    fn test_error_messages_carry_context() {
        let err = AppError::fetch("shows", "status 500");
        assert_eq!(err.to_string(), "Fetch error for shows: status 500");

        let err = AppError::dispatch("1234", "connection reset");
        assert_eq!(
            err.to_string(),
            "Dispatch error for show 1234: connection reset"
        );
    }

    #[test]
    fn test_json_errors_convert() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Json(_)));
        assert!(!err.is_fatal());
    }
}
