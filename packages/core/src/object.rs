//! The keyed JSON accessor.
//!
//! [`JsonObject`] wraps exactly one parsed JSON object and extracts typed
//! fields from it through a [`Converter`]. Entities implement
//! [`Decodable`](crate::Decodable) as a sequence of `get` calls, one per
//! field, in declared order.
//!
//! | Input | `get` (required) | `get_optional` |
//! |-------|------------------|----------------|
//! | key absent | `MissingRequiredKey` | `Ok(None)` |
//! | `null` | `UnexpectedType` (found `null`) | `Ok(None)` |
//! | wrong kind | `UnexpectedType` | `UnexpectedType` |
//! | right kind, rejected by converter | `UnexpectedValue` | `UnexpectedValue` |
//! | right kind, accepted | `Ok(value)` | `Ok(Some(value))` |

use serde_json::{Map, Value};

use crate::convert::{apply, Converter};
use crate::decode::{Convertible, Decodable};
use crate::error::DecodeError;

/// Typed field access over one borrowed JSON object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsonObject<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Wrap `value` if it is a JSON object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// Required field, converted with `T`'s default converter.
    pub fn get<T: Convertible>(&self, key: &str) -> Result<T, DecodeError> {
        self.get_with(key, &T::converter())
    }

    /// Optional field, converted with `T`'s default converter.
    pub fn get_optional<T: Convertible>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        self.get_optional_with(key, &T::converter())
    }

    /// Required field, converted with an explicit converter.
    pub fn get_with<C: Converter>(&self, key: &str, converter: &C) -> Result<C::Target, DecodeError> {
        let value = self
            .map
            .get(key)
            .ok_or_else(|| DecodeError::MissingRequiredKey(key.to_owned()))?;
        apply(converter, key, value)
    }

    /// Optional field, converted with an explicit converter. A missing key
    /// and an explicit `null` both yield `Ok(None)`.
    pub fn get_optional_with<C: Converter>(
        &self,
        key: &str,
        converter: &C,
    ) -> Result<Option<C::Target>, DecodeError> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => apply(converter, key, value).map(Some),
        }
    }

    /// Run `T`'s decodable factory over this object.
    pub fn decode<T: Decodable>(&self) -> Result<T, DecodeError> {
        T::decode(self)
    }
}
