//! Converter strategies: fallible transforms from one raw JSON representation
//! to one typed value.
//!
//! A [`Converter`] declares its source representation through
//! [`Converter::Source`] and its output through [`Converter::Target`]. The
//! source is checked against the raw value *before* the converter runs, so a
//! converter only ever sees well-typed input and can only fail with
//! [`DecodeError::UnexpectedValue`].
//!
//! | Converter | Source | Target |
//! |-----------|--------|--------|
//! | [`Identity`] | `&str`, `i64`, `u64`, `f64`, `bool` | the same primitive |
//! | [`ObjectConverter`] | object | any [`Decodable`] |
//! | [`ListConverter`] | array | `Vec` of the element converter's target |
//! | [`UrlConverter`] | `&str` | [`url::Url`] (absolute only) |
//! | [`TimestampConverter`] | `&str` | [`chrono::DateTime<Utc>`] |
//!
//! Converters never nest on their own; a list of repositories is spelled
//! `ListConverter::new(ObjectConverter::<Repository>::new())`.

use std::borrow::Cow;
use std::marker::PhantomData;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use url::Url;

use crate::decode::Decodable;
use crate::error::DecodeError;
use crate::kind::JsonKind;
use crate::object::JsonObject;

/// The wire pattern GitHub uses for every timestamp field.
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%Y-%m-%dT%H:%M:%SZ";

// ---------------------------------------------------------------------------
// JsonSource
// ---------------------------------------------------------------------------

/// A source representation a converter can consume, borrowed from the raw
/// value where possible.
pub trait JsonSource<'a>: Sized {
    /// The JSON kind a raw value must have to be projected into `Self`.
    const KIND: JsonKind;

    /// Name used in out-of-range messages.
    const NAME: &'static str;

    /// Project a raw value. Returns `None` when the kind matches but the
    /// value is not representable (an integer beyond `i64`, for instance).
    fn project(value: &'a Value) -> Option<Self>;
}

impl<'a> JsonSource<'a> for &'a str {
    const KIND: JsonKind = JsonKind::String;
    const NAME: &'static str = "string";

    fn project(value: &'a Value) -> Option<Self> {
        value.as_str()
    }
}

impl<'a> JsonSource<'a> for i64 {
    const KIND: JsonKind = JsonKind::Integer;
    const NAME: &'static str = "i64";

    fn project(value: &'a Value) -> Option<Self> {
        value.as_i64()
    }
}

impl<'a> JsonSource<'a> for u64 {
    const KIND: JsonKind = JsonKind::Integer;
    const NAME: &'static str = "u64";

    fn project(value: &'a Value) -> Option<Self> {
        value.as_u64()
    }
}

impl<'a> JsonSource<'a> for f64 {
    const KIND: JsonKind = JsonKind::Number;
    const NAME: &'static str = "f64";

    fn project(value: &'a Value) -> Option<Self> {
        value.as_f64()
    }
}

impl<'a> JsonSource<'a> for bool {
    const KIND: JsonKind = JsonKind::Bool;
    const NAME: &'static str = "bool";

    fn project(value: &'a Value) -> Option<Self> {
        value.as_bool()
    }
}

impl<'a> JsonSource<'a> for &'a Map<String, Value> {
    const KIND: JsonKind = JsonKind::Object;
    const NAME: &'static str = "object";

    fn project(value: &'a Value) -> Option<Self> {
        value.as_object()
    }
}

impl<'a> JsonSource<'a> for &'a [Value] {
    const KIND: JsonKind = JsonKind::Array;
    const NAME: &'static str = "array";

    fn project(value: &'a Value) -> Option<Self> {
        value.as_array().map(Vec::as_slice)
    }
}

// ---------------------------------------------------------------------------
// Converter
// ---------------------------------------------------------------------------

/// A stateless (or trivially parameterised) transform from one JSON
/// representation to one typed value.
pub trait Converter {
    /// The representation this converter consumes.
    type Source<'a>: JsonSource<'a>;

    /// The value this converter produces.
    type Target;

    /// Convert a well-typed source value. `key` is only used for error
    /// reporting.
    fn convert(&self, key: &str, source: Self::Source<'_>) -> Result<Self::Target, DecodeError>;
}

/// Type-check `value` against the converter's source kind, project it, and
/// run the converter.
///
/// This is the single place where `UnexpectedType` is produced; converters
/// themselves only ever see input of the right shape.
pub fn apply<'v, C: Converter>(
    converter: &C,
    key: &str,
    value: &'v Value,
) -> Result<C::Target, DecodeError> {
    let expected = <C::Source<'v> as JsonSource<'v>>::KIND;
    let actual = JsonKind::of(value);
    if !expected.accepts(actual) {
        return Err(DecodeError::UnexpectedType {
            key: key.to_owned(),
            expected,
            actual,
        });
    }

    match <C::Source<'v> as JsonSource<'v>>::project(value) {
        Some(source) => converter.convert(key, source),
        None => Err(DecodeError::unexpected_value(
            key,
            value.clone(),
            format!(
                "out of range for {}",
                <C::Source<'v> as JsonSource<'v>>::NAME
            ),
        )),
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Returns its input unchanged. Used for every primitive field.
#[derive(Debug, Clone, Copy)]
pub struct Identity<T>(PhantomData<T>);

impl<T> Identity<T> {
    pub fn new() -> Self {
        Identity(PhantomData)
    }
}

impl<T> Default for Identity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for Identity<String> {
    type Source<'a> = &'a str;
    type Target = String;

    fn convert(&self, _key: &str, source: &str) -> Result<String, DecodeError> {
        Ok(source.to_owned())
    }
}

macro_rules! identity_converter {
    ($($t:ty),* $(,)?) => {
        $(
            impl Converter for Identity<$t> {
                type Source<'a> = $t;
                type Target = $t;

                fn convert(&self, _key: &str, source: $t) -> Result<$t, DecodeError> {
                    Ok(source)
                }
            }
        )*
    };
}

identity_converter!(i64, u64, f64, bool);

// ---------------------------------------------------------------------------
// ObjectConverter / ListConverter
// ---------------------------------------------------------------------------

/// Re-wraps a nested JSON object and runs `T`'s [`Decodable`] factory on it.
#[derive(Debug, Clone, Copy)]
pub struct ObjectConverter<T>(PhantomData<fn() -> T>);

impl<T> ObjectConverter<T> {
    pub fn new() -> Self {
        ObjectConverter(PhantomData)
    }
}

impl<T> Default for ObjectConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Decodable> Converter for ObjectConverter<T> {
    type Source<'a> = &'a Map<String, Value>;
    type Target = T;

    fn convert(&self, _key: &str, source: &Map<String, Value>) -> Result<T, DecodeError> {
        T::decode(&JsonObject::new(source))
    }
}

/// Applies an element converter to every member of an array, in order.
///
/// All-or-nothing: the first element that fails aborts the whole list with
/// that element's error. An element of the wrong kind is reported under the
/// key `"{key}[{index}]"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListConverter<C> {
    element: C,
}

impl<C> ListConverter<C> {
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: Converter> Converter for ListConverter<C> {
    type Source<'a> = &'a [Value];
    type Target = Vec<C::Target>;

    fn convert(&self, key: &str, source: &[Value]) -> Result<Self::Target, DecodeError> {
        source
            .iter()
            .enumerate()
            .map(|(i, value)| apply(&self.element, &format!("{key}[{i}]"), value))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// UrlConverter
// ---------------------------------------------------------------------------

/// Parses a string as an absolute URL. Relative references are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlConverter;

impl Converter for UrlConverter {
    type Source<'a> = &'a str;
    type Target = Url;

    fn convert(&self, key: &str, source: &str) -> Result<Url, DecodeError> {
        Url::parse(source)
            .map_err(|e| DecodeError::unexpected_value(key, source, format!("invalid URL: {e}")))
    }
}

// ---------------------------------------------------------------------------
// TimestampConverter
// ---------------------------------------------------------------------------

/// Parses a formatted date-time string as a UTC instant.
///
/// The pattern uses `chrono`'s `strftime` syntax and is interpreted in UTC on
/// the proleptic Gregorian calendar. The default is
/// [`DEFAULT_TIMESTAMP_PATTERN`] (`2018-02-08T12:34:56Z`).
#[derive(Debug, Clone)]
pub struct TimestampConverter {
    pattern: Cow<'static, str>,
}

impl TimestampConverter {
    pub fn new(pattern: impl Into<Cow<'static, str>>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for TimestampConverter {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTAMP_PATTERN)
    }
}

impl Converter for TimestampConverter {
    type Source<'a> = &'a str;
    type Target = DateTime<Utc>;

    fn convert(&self, key: &str, source: &str) -> Result<DateTime<Utc>, DecodeError> {
        NaiveDateTime::parse_from_str(source, &self.pattern)
            .map(|naive| naive.and_utc())
            .map_err(|_| {
                DecodeError::unexpected_value(
                    key,
                    source,
                    format!("invalid date format for '{}'", self.pattern),
                )
            })
    }
}

// --- tests -------------------------------------------------------------------
