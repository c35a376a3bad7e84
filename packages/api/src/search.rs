//! Repository search — `GET /search/repositories`.

use std::borrow::Cow;

use ghsearch::{Convertible, DecodeError, Decodable, JsonObject, ObjectConverter, Repository};
use serde::Serialize;

use crate::endpoint::{Endpoint, Parameters};

/// One page of search hits.
///
/// ```json
/// { "total_count": 40, "incomplete_results": false, "items": [ … ] }
/// ```
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchResult<T> {
    /// Number of matches across all pages.
    pub total_count: i64,

    /// Set when the search timed out server-side and `items` may be a
    /// subset of the true matches.
    pub incomplete_results: bool,

    /// The hits on this page, in relevance order.
    pub items: Vec<T>,
}

impl<T: Convertible> Decodable for SearchResult<T> {
    fn decode(json: &JsonObject<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            total_count: json.get("total_count")?,
            incomplete_results: json.get("incomplete_results")?,
            items: json.get("items")?,
        })
    }
}

impl<T: Convertible> Convertible for SearchResult<T> {
    type Converter = ObjectConverter<Self>;
}

/// Search repositories by keyword and qualifiers.
///
/// `query` is passed verbatim as the `q` parameter, so GitHub's qualifier
/// syntax (`language:rust stars:>100`) works as-is. `page` is 1-based on
/// GitHub's side; no other pagination is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRepositories {
    pub query: String,
    pub page: u32,
}

impl SearchRepositories {
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
        }
    }
}

impl Endpoint for SearchRepositories {
    type Response = SearchResult<Repository>;

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("search/repositories")
    }

    fn query(&self) -> Parameters {
        vec![
            ("q".to_string(), self.query.clone()),
            ("page".to_string(), self.page.to_string()),
        ]
    }
}
