//! Value kinds and built-in transforms.
//!
//! These cover the common predicates and parse steps so that descriptors can be
//! declared without closures, e.g. from a TOML type file.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Coarse runtime kind of an argument value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Matches every value.
    #[default]
    Any,
    Null,
    Bool,
    /// Any number, integral or not.
    Number,
    /// Numbers representable as `i64` or `u64`.
    Integer,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// The most specific kind of `value`. Never returns `Any`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => ValueKind::Integer,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Check whether `value` belongs to this kind.
    pub fn matches(self, value: &Value) -> bool {
        match (self, ValueKind::of(value)) {
            (ValueKind::Any, _) => true,
            (ValueKind::Number, ValueKind::Integer) => true,
            (expected, actual) => expected == actual,
        }
    }
}

/// Built-in parse step applied to a matched value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Store the value unchanged.
    #[default]
    Identity,
    /// Strings pass through; everything else is rendered as JSON text.
    String,
    /// Collapse to a boolean by truthiness.
    Bool,
    /// Coerce to a number; unparsable input becomes `null`.
    Number,
}

impl Transform {
    pub fn apply(self, value: Value) -> Value {
        match self {
            Transform::Identity => value,
            Transform::String => match value {
                Value::String(_) => value,
                other => Value::String(other.to_string()),
            },
            Transform::Bool => Value::Bool(truthy(&value)),
            Transform::Number => to_number(value),
        }
    }
}

/// Loose truthiness: `null`, `false`, `0` and `""` are false, everything else true.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn to_number(value: Value) -> Value {
    match value {
        Value::Number(_) => value,
        Value::Null => Value::from(0),
        Value::Bool(b) => Value::from(u8::from(b)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Value::from(0);
            }
            if let Ok(i) = trimmed.parse::<i64>() {
                return Value::from(i);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null)
        }
        Value::Array(_) | Value::Object(_) => Value::Null,
    }
}
