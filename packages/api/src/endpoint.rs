//! Declarative endpoint descriptors and the wire requests built from them.
//!
//! An [`Endpoint`] states *what* to fetch: a path relative to the API
//! origin, a method, query parameters, extra headers, and the
//! [`Decodable`] type the response body must decode into. [`WireRequest`]
//! is the pure translation of a descriptor into something a transport can
//! send; building one performs no I/O.

use std::borrow::Cow;
use std::collections::BTreeMap;

use ghsearch::Decodable;
use url::Url;

/// Origin every GitHub endpoint path is joined against.
pub const GITHUB_API_ORIGIN: &str = "https://api.github.com";

/// Media type requested from GitHub unless an endpoint overrides `Accept`.
pub const GITHUB_V3_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Query parameters, in the order they appear on the wire.
pub type Parameters = Vec<(String, String)>;

/// Header name → value.
pub type Headers = BTreeMap<String, String>;

/// Headers attached to every request before endpoint headers are applied.
pub fn default_headers() -> Headers {
    Headers::from([("Accept".to_string(), GITHUB_V3_MEDIA_TYPE.to_string())])
}

// ---------------------------------------------------------------------------
// HttpMethod
// ---------------------------------------------------------------------------

/// HTTP request method. Serialises on the wire as its uppercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    Options,
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Trace,
    Connect,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a method from its uppercase name.
impl std::str::FromStr for HttpMethod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPTIONS" => Ok(HttpMethod::Options),
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "TRACE" => Ok(HttpMethod::Trace),
            "CONNECT" => Ok(HttpMethod::Connect),
            _ => Err(format!(
                "unknown HTTP method {:?}; expected one of: \
                 OPTIONS, GET, HEAD, POST, PUT, DELETE, TRACE, CONNECT",
                s
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// A declarative description of one HTTP resource and its response shape.
///
/// Only [`path`](Endpoint::path) and the response type are required; the
/// method defaults to `GET` and the query and extra headers to none.
pub trait Endpoint {
    /// The type the JSON response body decodes into.
    type Response: Decodable;

    /// Path relative to the API origin, e.g. `"search/repositories"`.
    fn path(&self) -> Cow<'_, str>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn query(&self) -> Parameters {
        Parameters::new()
    }

    /// Headers added on top of [`default_headers`]. A header with the same
    /// name (compared case-insensitively) replaces the default.
    fn headers(&self) -> Headers {
        Headers::new()
    }
}

// ---------------------------------------------------------------------------
// WireRequest
// ---------------------------------------------------------------------------

/// A fully resolved request: method, absolute URL with query string, headers.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Headers,
}

impl WireRequest {
    /// Resolve `endpoint` against `origin`.
    ///
    /// The origin is treated as a directory (a missing trailing slash is
    /// added) so that an origin with a path prefix keeps it. The query
    /// string is only attached when the endpoint declares parameters.
    pub fn build<E: Endpoint + ?Sized>(origin: &Url, endpoint: &E) -> Result<Self, url::ParseError> {
        let mut base = origin.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let path = endpoint.path();
        let mut url = base.join(path.trim_start_matches('/'))?;

        let query = endpoint.query();
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let mut headers = default_headers();
        for (name, value) in endpoint.headers() {
            headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
            headers.insert(name, value);
        }

        Ok(Self {
            method: endpoint.method(),
            url,
            headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghsearch::{DecodeError, JsonObject};

    struct RateLimit;

    impl Decodable for RateLimit {
        fn decode(_json: &JsonObject<'_>) -> Result<Self, DecodeError> {
            Ok(RateLimit)
        }
    }

    struct GetRateLimit;

    impl Endpoint for GetRateLimit {
        type Response = RateLimit;

        fn path(&self) -> Cow<'_, str> {
            Cow::Borrowed("/rate_limit")
        }
    }

    struct PreviewDelete;

    impl Endpoint for PreviewDelete {
        type Response = RateLimit;

        fn path(&self) -> Cow<'_, str> {
            Cow::Borrowed("repos/a/foo")
        }

        fn method(&self) -> HttpMethod {
            HttpMethod::Delete
        }

        fn headers(&self) -> Headers {
            Headers::from([
                ("accept".to_string(), "application/vnd.github.mercy-preview+json".to_string()),
                ("X-Trace".to_string(), "1".to_string()),
            ])
        }
    }

    fn github() -> Url {
        Url::parse(GITHUB_API_ORIGIN).unwrap()
    }

    #[test]
    fn defaults_are_get_no_query_and_accept_header() {
        let req = WireRequest::build(&github(), &GetRateLimit).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url.as_str(), "https://api.github.com/rate_limit");
        assert_eq!(req.url.query(), None);
        assert_eq!(req.headers, default_headers());
    }

    #[test]
    fn endpoint_headers_override_defaults_case_insensitively() {
        let req = WireRequest::build(&github(), &PreviewDelete).unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.headers.len(), 2);
        assert!(!req.headers.contains_key("Accept"));
        assert_eq!(
            req.headers.get("accept").map(String::as_str),
            Some("application/vnd.github.mercy-preview+json")
        );
    }

    #[test]
    fn origin_path_prefix_is_kept() {
        let origin = Url::parse("https://ghe.example.com/api/v3").unwrap();
        let req = WireRequest::build(&origin, &GetRateLimit).unwrap();
        assert_eq!(req.url.as_str(), "https://ghe.example.com/api/v3/rate_limit");
    }

    #[test]
    fn method_roundtrip() {
        for m in [
            HttpMethod::Options,
            HttpMethod::Get,
            HttpMethod::Head,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Trace,
            HttpMethod::Connect,
        ] {
            assert_eq!(m.to_string().parse::<HttpMethod>(), Ok(m));
        }
        assert!("get".parse::<HttpMethod>().is_err());
    }
}
