//! Loosely-typed client input.
//!
//! Clients send thinking settings in several dialects, and nothing about the
//! shape can be trusted. `LooseValue` is a closed variant type that every
//! accessor narrows explicitly, instead of deserializing into a fixed schema.

use std::collections::BTreeMap;

/// Untrusted value of unknown shape.
///
/// Unlike `serde_json::Value`, numbers are plain `f64` so non-finite values
/// (`NaN`, `±Infinity`) can be represented and rejected by consumers.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LooseValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<LooseValue>),
    Object(BTreeMap<String, LooseValue>),
    /// Anything that does not fit the variants above.
    Other,
}

impl LooseValue {
    /// Build an object from `(key, value)` pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, LooseValue)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Field lookup. `None` for missing keys and for non-object values.
    pub fn get(&self, key: &str) -> Option<&LooseValue> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, LooseValue>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view. Non-finite numbers are returned as-is.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for LooseValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Other, Self::Number),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            },
        }
    }
}

impl From<&serde_json::Value> for LooseValue {
    fn from(value: &serde_json::Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<bool> for LooseValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for LooseValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for LooseValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for LooseValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
