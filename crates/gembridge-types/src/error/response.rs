//! Response post-processing errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading an upstream response body.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ResponseError {
    /// Body exceeds the configured inspection limit
    #[error("Response body too large: {size} bytes (limit {limit})")]
    BodyTooLarge { size: usize, limit: usize },

    /// Body is not valid UTF-8
    #[error("Response body is not valid UTF-8: {message}")]
    InvalidUtf8 { message: String },

    /// Body is not valid JSON
    #[error("Response body is not valid JSON: {message}")]
    InvalidJson { message: String },

    /// Upstream byte stream failed mid-read
    #[error("Stream error: {message}")]
    StreamError { message: String },
}
