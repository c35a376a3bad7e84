//! Classification of raw JSON values.
//!
//! [`JsonKind`] names the representation of a [`serde_json::Value`] as it
//! appears on the wire. Decode errors report both the kind a converter
//! expected and the kind actually found, so that a number-where-a-string-was-
//! expected is distinguishable from an absent key.

use serde_json::Value;

/// The representation of a raw JSON value.
///
/// Numbers are split in two: a number that fits an `i64` or `u64` is an
/// [`Integer`](JsonKind::Integer); anything else (`1.5`, `1e300`) is a
/// [`Number`](JsonKind::Number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Bool,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classify a raw value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => JsonKind::Integer,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }

    /// Whether a value of kind `actual` satisfies a converter expecting `self`.
    ///
    /// `Number` accepts integers (`"score": 1` is a valid floating-point
    /// score); every other kind requires an exact match.
    pub fn accepts(self, actual: JsonKind) -> bool {
        self == actual || (self == JsonKind::Number && actual == JsonKind::Integer)
    }
}

/// Formats the kind as a lowercase word (e.g. `"integer"`).
impl std::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonKind::Null => write!(f, "null"),
            JsonKind::Bool => write!(f, "bool"),
            JsonKind::Integer => write!(f, "integer"),
            JsonKind::Number => write!(f, "number"),
            JsonKind::String => write!(f, "string"),
            JsonKind::Array => write!(f, "array"),
            JsonKind::Object => write!(f, "object"),
        }
    }
}
