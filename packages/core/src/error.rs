use serde_json::Value;
use thiserror::Error;

use crate::kind::JsonKind;

/// Errors returned when a JSON object cannot be decoded into a typed value.
///
/// Every variant names the key it concerns. Decoding stops at the first
/// error, so the key identifies exactly which field (in declared order)
/// was rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecodeError {
    #[error("missing required key {0:?}")]
    MissingRequiredKey(String),

    #[error("key {key:?}: expected {expected}, found {actual}")]
    UnexpectedType {
        key: String,
        expected: JsonKind,
        actual: JsonKind,
    },

    #[error("key {key:?}: unexpected value {value}: {reason}")]
    UnexpectedValue {
        key: String,
        value: Value,
        reason: String,
    },
}

impl DecodeError {
    /// The key this error is about.
    pub fn key(&self) -> &str {
        match self {
            DecodeError::MissingRequiredKey(key)
            | DecodeError::UnexpectedType { key, .. }
            | DecodeError::UnexpectedValue { key, .. } => key,
        }
    }

    pub(crate) fn unexpected_value(
        key: &str,
        value: impl Into<Value>,
        reason: impl Into<String>,
    ) -> Self {
        DecodeError::UnexpectedValue {
            key: key.to_owned(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
