//! Runtime configuration for the compatibility layer.

use serde::{Deserialize, Serialize};

/// Default cap on response bodies inspected for usage (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// How client thinking settings are forwarded upstream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThinkingNormalizationMode {
    /// Normalize all dialects into the native Gemini shape.
    #[default]
    Normalize,
    /// Passthrough: forward the client's value unchanged.
    Passthrough,
}

/// Thinking-related settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ThinkingCompatConfig {
    #[serde(default)]
    pub mode: ThinkingNormalizationMode,
}

/// Response post-processing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseConfig {
    /// Extract `usageMetadata` from response bodies.
    #[serde(default = "default_extract_usage")]
    pub extract_usage: bool,
    /// Bodies larger than this are not parsed.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_extract_usage() -> bool {
    true
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self { extract_usage: true, max_body_bytes: DEFAULT_MAX_BODY_BYTES }
    }
}

/// Top-level config file model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CompatConfig {
    #[serde(default)]
    pub thinking: ThinkingCompatConfig,
    #[serde(default)]
    pub response: ResponseConfig,
}
