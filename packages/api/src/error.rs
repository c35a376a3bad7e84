//! Error body GitHub returns alongside non-2xx statuses.

use ghsearch::{DecodeError, Decodable, JsonObject};
use url::Url;

/// The JSON body returned for GitHub API errors.
///
/// ```json
/// {
///   "message": "Validation Failed",
///   "documentation_url": "https://docs.github.com/v3/search"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Human-readable description of the problem.
    pub message: String,

    /// Link to the relevant API documentation, when GitHub supplies one.
    pub documentation_url: Option<Url>,
}

impl Decodable for ErrorResponse {
    fn decode(json: &JsonObject<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            message: json.get("message")?,
            documentation_url: json.get_optional("documentation_url")?,
        })
    }
}
