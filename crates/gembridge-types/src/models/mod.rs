//! Domain models shared between the core and the CLI.

pub mod config;
pub mod loose_value;
pub mod thinking;
pub mod usage;

pub use config::{CompatConfig, ResponseConfig, ThinkingCompatConfig, ThinkingNormalizationMode};
pub use loose_value::LooseValue;
pub use thinking::{NormalizedThinkingConfig, ThinkingLevel};
pub use usage::UsageMetadata;
