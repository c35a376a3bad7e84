//! Typed JSON decoding for the GitHub search API.
//!
//! This crate turns a parsed [`serde_json::Value`] into strongly typed
//! domain values with precise, recoverable errors. It performs no I/O; the
//! `ghsearch-api` crate describes endpoints and `ghsearch-client` executes
//! them.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`kind`] | [`JsonKind`]: the representation of a raw value |
//! | [`convert`] | Converter strategies: [`Identity`], [`ObjectConverter`], [`ListConverter`], [`UrlConverter`], [`TimestampConverter`] |
//! | [`object`] | [`JsonObject`], the keyed accessor |
//! | [`decode`] | The [`Decodable`] and [`Convertible`] capabilities |
//! | [`types`] | Domain entities: [`Repository`], [`Owner`] |
//! | [`render`] | Human-readable text rendering |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use ghsearch::{JsonObject, Repository};
//!
//! let raw: serde_json::Value = serde_json::from_slice(&body)?;
//! let repo: Repository = JsonObject::from_value(&raw)
//!     .expect("response is an object")
//!     .decode()?;
//! println!("{} ★ {}", repo.full_name, repo.stargazers_count);
//! ```

pub mod convert;
pub mod decode;
pub mod error;
pub mod kind;
pub mod object;
pub mod render;
pub mod types;

pub use convert::{
    Converter, Identity, JsonSource, ListConverter, ObjectConverter, TimestampConverter,
    UrlConverter, DEFAULT_TIMESTAMP_PATTERN,
};
pub use decode::{Convertible, Decodable};
pub use error::DecodeError;
pub use kind::JsonKind;
pub use object::JsonObject;
pub use types::{Owner, Repository};
