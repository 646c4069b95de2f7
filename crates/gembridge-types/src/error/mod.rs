//! Typed error definitions for gembridge.
//!
//! All errors are designed to be:
//!
//! - **Serializable** for API responses via serde
//! - **Displayable** for logging via Display trait
//! - **Matchable** for error handling logic via enum variants

mod config;
mod response;

pub use config::ConfigError;
pub use response::ResponseError;
