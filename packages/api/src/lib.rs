//! Endpoint descriptors for the GitHub search API.
//!
//! This crate describes HTTP resources declaratively: each endpoint names
//! its path, method, query, headers, and the typed response its body
//! decodes into. Turning a descriptor into a [`WireRequest`] is pure
//! computation; `ghsearch-client` performs the I/O.
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | GET | `/search/repositories?q=…&page=…` | [`SearchRepositories`] → [`SearchResult`]`<`[`ghsearch::Repository`]`>` |
//! | any | any (non-2xx) | → [`ErrorResponse`] |

pub mod endpoint;
pub mod error;
pub mod search;

pub use endpoint::{
    default_headers, Endpoint, Headers, HttpMethod, Parameters, WireRequest, GITHUB_API_ORIGIN,
    GITHUB_V3_MEDIA_TYPE,
};
pub use error::ErrorResponse;
pub use search::{SearchRepositories, SearchResult};
