//! Unified error types for gembridge core.

use gembridge_types::error::{ConfigError, ResponseError};
use thiserror::Error;

/// Main error type for all gembridge operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AppError {
    /// Config file could not be read, parsed, validated or written.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Response body or stream could not be inspected.
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),
}

/// Result type alias for gembridge operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_error_converts() {
        let err: AppError = ResponseError::InvalidJson { message: "eof".to_string() }.into();
        assert!(matches!(err, AppError::Response(ResponseError::InvalidJson { .. })));
        assert_eq!(err.to_string(), "Response error: Response body is not valid JSON: eof");
    }

    #[test]
    fn test_config_error_converts() {
        let err: AppError = ConfigError::ParseError { message: "line 1".to_string() }.into();
        assert!(matches!(err, AppError::Config(ConfigError::ParseError { .. })));
        assert!(err.to_string().starts_with("Config error: Config parse error"));
    }
}
