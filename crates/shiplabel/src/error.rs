//! Error types for shiplabel.
//!
//! The encode and recover paths never fail; these errors belong to the
//! surrounding layers (configuration, identifier parsing, CLI output).

use thiserror::Error;

/// The main error type for shiplabel operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Identifier Errors ===
    /// The input is not a usable identifier URL.
    #[error("invalid identifier '{input}': {message}")]
    InvalidIdentifier {
        /// The rejected input.
        input: String,
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for shiplabel operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error came from identifier parsing.
    #[must_use]
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, Self::InvalidIdentifier { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_identifier_display() {
        let err = Error::invalid_identifier("not a url", "relative URL without a base");
        let msg = err.to_string();
        assert!(msg.contains("not a url"));
        assert!(msg.contains("relative URL without a base"));
    }

    #[test]
    fn test_is_invalid_identifier() {
        assert!(Error::invalid_identifier("x", "y").is_invalid_identifier());
        assert!(!Error::config_validation("bad").is_invalid_identifier());
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("base_url must use http or https");
        assert_eq!(
            err.to_string(),
            "invalid configuration: base_url must use http or https"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_figment_error() {
        let err: Error = figment::Error::from("boom".to_string()).into();
        assert!(matches!(err, Error::ConfigLoad(_)));
        assert!(err.to_string().contains("boom"));
    }
}
