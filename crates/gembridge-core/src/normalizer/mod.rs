//! Thinking config normalization.
//!
//! Clients configure Gemini thinking in three dialects: the Gemini 2.5
//! `thinkingBudget`, the Gemini 3 `thinkingLevel`, and the OpenAI-style
//! `reasoning_effort`. Each field also shows up in camelCase and snake_case.
//! This module folds all of them into one [`NormalizedThinkingConfig`] that
//! the upstream API accepts, or reports that there is nothing to send.
//!
//! Input is untrusted: every mistyped or out-of-range field is treated as
//! not provided. Nothing here returns an error.

use gembridge_types::{LooseValue, NormalizedThinkingConfig, ThinkingLevel};

/// Key aliases per logical field, highest priority first.
pub const THINKING_LEVEL_KEYS: [&str; 2] = ["thinkingLevel", "thinking_level"];
pub const REASONING_EFFORT_KEYS: [&str; 2] = ["reasoningEffort", "reasoning_effort"];
pub const THINKING_BUDGET_KEYS: [&str; 2] = ["thinkingBudget", "thinking_budget"];
pub const INCLUDE_THOUGHTS_KEYS: [&str; 2] = ["includeThoughts", "include_thoughts"];

/// Value of the first alias present. A present alias shadows later ones even
/// when its value is invalid; `null` counts as absent.
fn pick<'a>(config: &'a LooseValue, aliases: &[&str]) -> Option<&'a LooseValue> {
    aliases
        .iter()
        .find_map(|key| config.get(key).filter(|v| !matches!(v, LooseValue::Null)))
}

/// Normalize a client-supplied thinking config.
///
/// Returns `None` when the input carries nothing to configure; the caller
/// should then omit `thinkingConfig` from the upstream request entirely.
///
/// Precedence: a valid `thinkingLevel` beats `reasoning_effort`, and any
/// resolved level suppresses `thinkingBudget`. `includeThoughts` only
/// survives when thinking is actually enabled (a level, or a budget > 0).
pub fn normalize_thinking_config(config: &LooseValue) -> Option<NormalizedThinkingConfig> {
    let fields = config.as_object()?;
    if fields.is_empty() {
        return None;
    }

    let raw_level = pick(config, &THINKING_LEVEL_KEYS);
    let raw_effort = pick(config, &REASONING_EFFORT_KEYS);
    let raw_budget = pick(config, &THINKING_BUDGET_KEYS);
    let raw_include = pick(config, &INCLUDE_THOUGHTS_KEYS);

    let native_level = raw_level.and_then(LooseValue::as_str).and_then(ThinkingLevel::parse);
    if native_level.is_none() && raw_level.is_some() {
        tracing::debug!("[Thinking-Normalize] Ignoring invalid thinkingLevel: {:?}", raw_level);
    }
    let thinking_level = native_level.or_else(|| {
        raw_effort.and_then(LooseValue::as_str).and_then(ThinkingLevel::from_reasoning_effort)
    });

    let thinking_budget = raw_budget.and_then(LooseValue::as_f64).filter(|b| b.is_finite());
    if thinking_budget.is_none() && raw_budget.is_some() {
        tracing::debug!("[Thinking-Normalize] Ignoring invalid thinkingBudget: {:?}", raw_budget);
    }

    let enabled = thinking_level.is_some() || thinking_budget.is_some_and(|b| b > 0.0);

    let requested_include = raw_include.and_then(LooseValue::as_bool);
    let include_thoughts = enabled && requested_include.unwrap_or(false);

    // A bare `includeThoughts: false` says nothing; an explicit `true` is
    // acknowledged with a record even though it is forced off.
    if !enabled
        && !include_thoughts
        && thinking_level.is_none()
        && thinking_budget.is_none()
        && requested_include != Some(true)
    {
        return None;
    }

    let normalized = match thinking_level {
        Some(level) => NormalizedThinkingConfig::with_level(level, include_thoughts),
        None => NormalizedThinkingConfig {
            thinking_level: None,
            thinking_budget,
            include_thoughts,
        },
    };
    Some(normalized)
}

/// [`normalize_thinking_config`] over a parsed JSON value.
pub fn normalize_thinking_config_json(config: &serde_json::Value) -> Option<NormalizedThinkingConfig> {
    normalize_thinking_config(&LooseValue::from(config))
}
