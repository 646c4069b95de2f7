//! # gembridge Core
//!
//! Compatibility layer in front of the Gemini GenerateContent API.
//!
//! ```text
//! gembridge-core/src/
//! ├── normalizer/       # Thinking config dialects -> native Gemini thinkingConfig
//! ├── proxy/request.rs  # Applies the normalized config to outbound request bodies
//! ├── proxy/response/   # usageMetadata extraction from JSON and SSE bodies
//! └── modules/          # Config file + global accessor, logger setup
//! ```

#![allow(
    clippy::redundant_else,
    reason = "Explicit else blocks improve readability in complex control flow"
)]
// Test-only lints: allow panic!, println!, etc. in test code
#![cfg_attr(test, allow(clippy::panic, clippy::float_cmp, clippy::assertions_on_result_states))]

pub mod error;
pub mod modules;
pub mod normalizer;
pub mod proxy;

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use normalizer::{normalize_thinking_config, normalize_thinking_config_json};
pub use proxy::request::apply_thinking_config;
pub use proxy::response::{extract_usage, extract_usage_from_body, parse_json_body};
