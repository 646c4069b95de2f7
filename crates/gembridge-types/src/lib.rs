//! # gembridge Types
//!
//! Core types, models, and error definitions for gembridge.
//!
//! - **`error`** - Typed error hierarchy for configuration and response handling
//! - **`models`** - Thinking config, loose client input, usage metadata, config models
//!
//! ## Architecture Role
//!
//! `gembridge-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!   gembridge-types (this crate)
//!          │
//!          ▼
//!   gembridge-core
//!          │
//!          ▼
//!   gembridge-cli
//! ```

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{ConfigError, ResponseError};

// Re-export core model types
pub use models::{
    CompatConfig, LooseValue, NormalizedThinkingConfig, ResponseConfig, ThinkingCompatConfig,
    ThinkingLevel, ThinkingNormalizationMode, UsageMetadata,
};
