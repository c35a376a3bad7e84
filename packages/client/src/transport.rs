//! The transport boundary.
//!
//! A [`Transport`] takes a fully built [`WireRequest`] and returns the raw
//! status, headers, and body bytes, or a [`TransportError`] when no response
//! was received at all (DNS, TLS, timeout, connection reset). It does not
//! look at the body; interpreting it is the executor's job.
//!
//! # Implementations
//!
//! | Type | When to use |
//! |------|-------------|
//! | [`ReqwestTransport`] | Production; pooled `reqwest::Client` |
//! | any test double | Canned responses in unit tests |

use async_trait::async_trait;
use bytes::Bytes;
use ghsearch_api::{Headers, WireRequest};

use crate::config::ClientConfig;

// ---------------------------------------------------------------------------
// TransportResponse
// ---------------------------------------------------------------------------

/// What came back over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: Headers,
    /// `None` when the response carried no payload.
    pub body: Option<Bytes>,
}

impl TransportResponse {
    /// A response with no headers. An empty `body` is stored as `None`.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        Self {
            status,
            headers: Headers::new(),
            body: (!body.is_empty()).then_some(body),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ---------------------------------------------------------------------------
// TransportError
// ---------------------------------------------------------------------------

/// Broad category of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Could not connect (DNS, refused, TLS handshake).
    Connect,
    Timeout,
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportErrorKind::Connect => write!(f, "connect"),
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::Other => write!(f, "transport"),
        }
    }
}

/// The request never produced a response. Wraps whatever the underlying
/// transport reported.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {source}")]
pub struct TransportError {
    kind: TransportErrorKind,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    pub fn new(
        kind: TransportErrorKind,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn is_connect(&self) -> bool {
        self.kind == TransportErrorKind::Connect
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            TransportErrorKind::Timeout
        } else if e.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, e)
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Executes one wire request. Implementations must be shareable across
/// concurrently running requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: WireRequest) -> Result<TransportResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`, which pools connections
/// internally. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap a pre-configured client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client with the configured timeout and `User-Agent`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: WireRequest) -> Result<TransportResponse, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| TransportError::new(TransportErrorKind::Other, e))?;

        let mut builder = self.client.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            headers,
            body: (!body.is_empty()).then_some(body),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{http::HeaderMap, routing::get, Router};
    use ghsearch_api::{HttpMethod, GITHUB_V3_MEDIA_TYPE};
    use tokio::net::TcpListener;
    use url::Url;

    /// Spawn a loopback axum server and return its base URL.
    async fn spawn_mock_server(router: Router) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    fn get_request(url: Url) -> WireRequest {
        WireRequest {
            method: HttpMethod::Get,
            url,
            headers: ghsearch_api::default_headers(),
        }
    }

    #[test]
    fn empty_body_is_stored_as_none() {
        assert_eq!(TransportResponse::new(200, Bytes::new()).body, None);
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(404, "{}").is_success());
    }

    #[tokio::test]
    async fn forwards_headers_and_returns_body() {
        async fn echo_accept(headers: HeaderMap) -> String {
            let accept = headers
                .get("accept")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let agent = headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            format!("{accept}|{agent}")
        }

        let base = spawn_mock_server(Router::new().route("/echo", get(echo_accept))).await;
        let config = ClientConfig {
            user_agent: "ghsearch-test".into(),
            ..ClientConfig::default()
        };
        let transport = ReqwestTransport::from_config(&config).unwrap();

        let response = transport
            .execute(get_request(base.join("echo").unwrap()))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            response.body.as_deref(),
            Some(format!("{GITHUB_V3_MEDIA_TYPE}|ghsearch-test").as_bytes())
        );
        assert_eq!(
            response.headers.get("content-type").map(String::as_str),
            Some("text/plain; charset=utf-8")
        );
    }

    #[tokio::test]
    async fn empty_200_has_no_body() {
        let base = spawn_mock_server(Router::new().route("/empty", get(|| async { "" }))).await;
        let transport = ReqwestTransport::new(reqwest::Client::new());
        let response = transport
            .execute(get_request(base.join("empty").unwrap()))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, None);
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        // Bind then drop to obtain a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new(
            reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
        );
        let url = Url::parse(&format!("http://{addr}/search/repositories")).unwrap();
        let err = transport.execute(get_request(url)).await.unwrap_err();
        assert!(err.is_connect(), "unexpected error kind: {err}");
    }

    #[tokio::test]
    async fn slow_server_is_a_timeout() {
        async fn stall() -> &'static str {
            tokio::time::sleep(Duration::from_secs(3)).await;
            "{}"
        }

        let base = spawn_mock_server(Router::new().route("/slow", get(stall))).await;
        let config = ClientConfig {
            timeout: Duration::from_millis(200),
            ..ClientConfig::default()
        };
        let transport = ReqwestTransport::from_config(&config).unwrap();

        let err = transport
            .execute(get_request(base.join("slow").unwrap()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), TransportErrorKind::Timeout);
        assert!(err.is_timeout());
        assert!(!err.is_connect());
        assert!(err.to_string().starts_with("timeout error: "), "{err}");
    }
}
