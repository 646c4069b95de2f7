//! Gemini usage metadata.

use serde::{Deserialize, Serialize};

/// Token counts reported in a Gemini `usageMetadata` object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u64,
    #[serde(default)]
    pub candidates_token_count: u64,
    #[serde(default)]
    pub total_token_count: u64,
    #[serde(default)]
    pub cached_content_token_count: u64,
    /// Tokens spent on thinking; reported separately from candidates.
    #[serde(default)]
    pub thoughts_token_count: u64,
}

impl UsageMetadata {
    /// Output tokens billed to the caller (candidates plus thoughts).
    pub fn output_tokens(&self) -> u64 {
        self.candidates_token_count.saturating_add(self.thoughts_token_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_usage() {
        let usage: UsageMetadata =
            serde_json::from_str(r#"{"promptTokenCount":10,"totalTokenCount":30}"#)
                .expect("deserialize");
        assert_eq!(usage.prompt_token_count, 10);
        assert_eq!(usage.candidates_token_count, 0);
        assert_eq!(usage.total_token_count, 30);
    }

    #[test]
    fn test_output_tokens_include_thoughts() {
        let usage = UsageMetadata {
            candidates_token_count: 40,
            thoughts_token_count: 100,
            ..Default::default()
        };
        assert_eq!(usage.output_tokens(), 140);
    }
}
