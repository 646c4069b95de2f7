//! Outbound request rewriting.
//!
//! Finds whatever thinking settings the client put in the request body,
//! normalizes them, and writes back the native `generationConfig.thinkingConfig`.

use gembridge_types::{NormalizedThinkingConfig, ThinkingNormalizationMode};
use serde_json::{Map, Value};

use crate::normalizer::{normalize_thinking_config_json, REASONING_EFFORT_KEYS};

const GENERATION_CONFIG_KEYS: [&str; 2] = ["generationConfig", "generation_config"];
const THINKING_CONFIG_KEYS: [&str; 2] = ["thinkingConfig", "thinking_config"];

/// Remove every alias from `map`, returning the first non-null value in alias order.
fn take_first(map: &mut Map<String, Value>, aliases: &[&str]) -> Option<Value> {
    let mut found = None;
    for key in aliases {
        if let Some(value) = map.remove(*key) {
            if found.is_none() && !value.is_null() {
                found = Some(value);
            }
        }
    }
    found
}

/// Normalize the thinking settings of a Gemini request body in place.
///
/// Sources, in order: `generationConfig.thinkingConfig` (or its snake_case
/// spelling), then a top-level OpenAI-style `reasoning_effort`, which is
/// only used when the thinking config does not carry an effort of its own.
/// Top-level effort keys are always stripped since Gemini rejects them.
///
/// Returns the config that was written, or `None` when `thinkingConfig` was
/// removed (nothing to configure) or `mode` is passthrough.
pub fn apply_thinking_config(
    body: &mut Value,
    mode: ThinkingNormalizationMode,
) -> Option<NormalizedThinkingConfig> {
    if mode == ThinkingNormalizationMode::Passthrough {
        tracing::debug!("[Thinking-Apply] Passthrough mode, request left untouched");
        return None;
    }
    let root = body.as_object_mut()?;

    let top_level_effort = take_first(root, &REASONING_EFFORT_KEYS);

    let gen_key = GENERATION_CONFIG_KEYS
        .into_iter()
        .find(|key| root.get(*key).is_some_and(Value::is_object));

    let mut raw = Value::Null;
    if let Some(key) = gen_key {
        if let Some(gen) = root.get_mut(key).and_then(Value::as_object_mut) {
            raw = take_first(gen, &THINKING_CONFIG_KEYS).unwrap_or(Value::Null);
        }
    }

    if let Some(effort) = top_level_effort {
        match raw.as_object_mut() {
            Some(obj) => {
                let has_effort =
                    REASONING_EFFORT_KEYS.iter().any(|k| obj.get(*k).is_some_and(|v| !v.is_null()));
                if !has_effort {
                    obj.insert("reasoning_effort".to_string(), effort);
                }
            },
            None => {
                let mut obj = Map::new();
                obj.insert("reasoning_effort".to_string(), effort);
                raw = Value::Object(obj);
            },
        }
    }

    let normalized = normalize_thinking_config_json(&raw);

    match &normalized {
        Some(cfg) => {
            let gen = root
                .entry(gen_key.unwrap_or("generationConfig"))
                .or_insert_with(|| Value::Object(Map::new()));
            if !gen.is_object() {
                *gen = Value::Object(Map::new());
            }
            if let Some(gen) = gen.as_object_mut() {
                gen.insert("thinkingConfig".to_string(), cfg.to_json());
            }
            tracing::debug!("[Thinking-Apply] thinkingConfig set to {}", cfg.to_json());
        },
        None if !raw.is_null() => {
            tracing::debug!("[Thinking-Apply] Nothing to configure, dropped thinkingConfig: {}", raw);
        },
        None => {},
    }

    normalized
}
