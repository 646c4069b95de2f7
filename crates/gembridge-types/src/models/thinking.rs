//! Normalized thinking configuration sent to the Gemini API.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};

use super::loose_value::LooseValue;

/// Largest integer an `f64` holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Native Gemini thinking level.
///
/// The API only accepts `low` and `high`; the OpenAI-style `medium` effort
/// is folded into `high` by [`ThinkingLevel::from_reasoning_effort`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingLevel {
    Low,
    High,
}

impl ThinkingLevel {
    /// Parse a native `thinkingLevel` value (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Map an OpenAI-style `reasoning_effort` value (case-insensitive).
    pub fn from_reasoning_effort(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ThinkingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thinking config in the shape the Gemini API consumes.
///
/// `thinking_level` and `thinking_budget` are mutually exclusive: the API
/// rejects requests carrying both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedThinkingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_level: Option<ThinkingLevel>,
    /// Integral budgets serialize as JSON integers.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_budget"
    )]
    pub thinking_budget: Option<f64>,
    #[serde(default)]
    pub include_thoughts: bool,
}

impl NormalizedThinkingConfig {
    pub fn with_level(level: ThinkingLevel, include_thoughts: bool) -> Self {
        Self { thinking_level: Some(level), thinking_budget: None, include_thoughts }
    }

    pub fn with_budget(budget: f64, include_thoughts: bool) -> Self {
        Self { thinking_level: None, thinking_budget: Some(budget), include_thoughts }
    }

    /// Wire form (`thinkingLevel` / `thinkingBudget` / `includeThoughts`).
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(level) = self.thinking_level {
            map.insert("thinkingLevel".to_string(), json!(level.as_str()));
        }
        if let Some(budget) = self.thinking_budget {
            map.insert("thinkingBudget".to_string(), budget_to_json(budget));
        }
        map.insert("includeThoughts".to_string(), json!(self.include_thoughts));
        Value::Object(map)
    }

    /// Same shape as [`Self::to_json`], as client input. Normalizing the
    /// result yields `self` again.
    pub fn to_loose_value(&self) -> LooseValue {
        let mut entries = Vec::with_capacity(3);
        if let Some(level) = self.thinking_level {
            entries.push(("thinkingLevel", LooseValue::from(level.as_str())));
        }
        if let Some(budget) = self.thinking_budget {
            entries.push(("thinkingBudget", LooseValue::Number(budget)));
        }
        entries.push(("includeThoughts", LooseValue::Bool(self.include_thoughts)));
        LooseValue::object(entries)
    }
}

/// Integral budgets within exact `f64` range, as `i64`.
fn integral_budget(budget: f64) -> Option<i64> {
    (budget.fract() == 0.0 && budget.abs() <= MAX_EXACT_INTEGER).then_some(budget as i64)
}

fn budget_to_json(budget: f64) -> Value {
    match integral_budget(budget) {
        Some(b) => json!(b),
        None => json!(budget),
    }
}

fn serialize_budget<S>(budget: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match budget.map(|b| (b, integral_budget(b))) {
        Some((_, Some(b))) => serializer.serialize_i64(b),
        Some((b, None)) => serializer.serialize_f64(b),
        None => serializer.serialize_none(),
    }
}
