//! The two capabilities that drive decoding.
//!
//! - [`Decodable`]: an entity that can construct itself from a
//!   [`JsonObject`].
//! - [`Convertible`]: a type with a default [`Converter`], so that
//!   `json.get::<T>(key)` picks the right converter from `T` alone.
//!
//! Dispatch is resolved statically. Primitives map to [`Identity`], `Url`
//! and `DateTime<Utc>` to their parsing converters, `Vec<T>` to a
//! [`ListConverter`] over `T`'s converter, and each entity opts in with
//! `type Converter = ObjectConverter<Self>`.

use chrono::{DateTime, Utc};
use url::Url;

use crate::convert::{
    Converter, Identity, ListConverter, TimestampConverter, UrlConverter,
};
use crate::error::DecodeError;
use crate::object::JsonObject;

/// A value constructed field-by-field from a JSON object.
///
/// Implementations extract fields in a fixed order and return the first
/// error unchanged. Construction is all-or-nothing: no partially built
/// value is ever returned.
pub trait Decodable: Sized {
    fn decode(json: &JsonObject<'_>) -> Result<Self, DecodeError>;
}

/// A type with a default converter.
pub trait Convertible: Sized {
    type Converter: Converter<Target = Self> + Default;

    fn converter() -> Self::Converter {
        Self::Converter::default()
    }
}

macro_rules! identity_convertible {
    ($($t:ty),* $(,)?) => {
        $(
            impl Convertible for $t {
                type Converter = Identity<$t>;
            }
        )*
    };
}

identity_convertible!(String, i64, u64, f64, bool);

impl Convertible for Url {
    type Converter = UrlConverter;
}

impl Convertible for DateTime<Utc> {
    type Converter = TimestampConverter;
}

impl<T: Convertible> Convertible for Vec<T> {
    type Converter = ListConverter<T::Converter>;
}
