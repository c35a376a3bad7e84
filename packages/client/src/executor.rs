//! The request/response pipeline.
//!
//! [`RequestExecutor`] turns an [`Endpoint`] into a [`WireRequest`], hands it
//! to a [`Transport`], and decodes what comes back:
//!
//! 1. Transport failure → [`ApiError::Transport`]; the body is never read.
//! 2. Non-2xx status carrying a GitHub error object → [`ApiError::Status`].
//! 3. No payload → [`ApiError::EmptyBody`].
//! 4. Payload that is not a JSON object → [`ApiError::UnexpectedResponseType`].
//! 5. Object → the endpoint's response type, or the first [`DecodeError`].
//!
//! Every request is independent: it builds its own request and its own JSON
//! tree, and nothing is cached or retried.

use std::sync::Arc;

use ghsearch::{Decodable, JsonKind, JsonObject};
use ghsearch_api::{Endpoint, ErrorResponse, WireRequest};
use serde_json::Value;
use tokio::task::JoinHandle;
use url::Url;

use crate::config::{ClientConfig, GITHUB_ORIGIN};
use crate::error::{ApiError, ApiResult};
use crate::logger::{Logger, NoopLogger, TracingLogger};
use crate::transport::{ReqwestTransport, Transport, TransportError, TransportResponse};

/// Executes endpoint descriptors against an API origin.
///
/// Cloning is cheap; clones share the transport and logger.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    origin: Url,
    logger: Arc<dyn Logger>,
}

impl RequestExecutor {
    /// An executor targeting the public GitHub API that logs nowhere.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            origin: GITHUB_ORIGIN.clone(),
            logger: Arc::new(NoopLogger),
        }
    }

    /// A `reqwest`-backed executor built from `config`, logging through
    /// `tracing`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport))
            .with_origin(config.api_origin.clone())
            .with_logger(Arc::new(TracingLogger)))
    }

    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Execute `endpoint` and decode its response.
    pub async fn send<E: Endpoint + ?Sized>(&self, endpoint: &E) -> ApiResult<E::Response> {
        let request = WireRequest::build(&self.origin, endpoint)?;
        self.logger
            .trace("executor", &format!("{} {}", request.method, request.url));

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                self.logger.debug("executor", &format!("transport failed: {e}"));
                return Err(e.into());
            }
        };

        self.logger.debug(
            "executor",
            &format!(
                "status {} ({} bytes)",
                response.status,
                response.body.as_ref().map_or(0, |b| b.len())
            ),
        );

        let result = decode_response(response);
        match &result {
            Ok(_) => self.logger.trace("executor", "decoded response"),
            Err(e) => self.logger.debug("executor", &format!("decode failed: {e}")),
        }
        result
    }

    /// Execute `endpoint` in the background and hand the result to
    /// `callback`.
    ///
    /// The callback runs exactly once, on a runtime worker thread, when the
    /// request completes. Aborting the returned handle cancels the in-flight
    /// request, in which case the callback never runs.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn dispatch<E, F>(&self, endpoint: E, callback: F) -> JoinHandle<()>
    where
        E: Endpoint + Send + Sync + 'static,
        E::Response: Send + 'static,
        F: FnOnce(ApiResult<E::Response>) + Send + 'static,
    {
        let executor = self.clone();
        tokio::spawn(async move {
            let result = executor.send(&endpoint).await;
            callback(result);
        })
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("origin", &self.origin.as_str())
            .finish_non_exhaustive()
    }
}

/// Interpret a transport response as `T`.
///
/// A non-2xx status is only reported as [`ApiError::Status`] when its body
/// is a GitHub error object; otherwise the body goes through the same
/// checks as a successful one.
pub fn decode_response<T: Decodable>(response: TransportResponse) -> ApiResult<T> {
    if !response.is_success() {
        if let Some(error) = response.body.as_deref().and_then(error_body) {
            return Err(ApiError::Status {
                status: response.status,
                message: error.message,
            });
        }
    }

    match response.body {
        Some(body) => decode_body(&body),
        None => Err(ApiError::EmptyBody),
    }
}

/// Parse `body` as JSON and decode the top-level object as `T`.
pub fn decode_body<T: Decodable>(body: &[u8]) -> ApiResult<T> {
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::UnexpectedResponseType {
            found: format!("invalid JSON: {e}"),
        })?;

    let object = JsonObject::from_value(&value).ok_or_else(|| ApiError::UnexpectedResponseType {
        found: JsonKind::of(&value).to_string(),
    })?;

    Ok(object.decode()?)
}

fn error_body(body: &[u8]) -> Option<ErrorResponse> {
    let value: Value = serde_json::from_slice(body).ok()?;
    JsonObject::from_value(&value)?.decode().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use ghsearch::DecodeError;
    use ghsearch_api::{HttpMethod, SearchRepositories, GITHUB_V3_MEDIA_TYPE};
    use serde_json::json;
    use tokio::sync::oneshot;

    use crate::transport::TransportErrorKind;

    /// Replies with a canned outcome and records the request it saw.
    struct CannedTransport {
        reply: Mutex<Option<Result<TransportResponse, TransportError>>>,
        seen: Mutex<Vec<WireRequest>>,
    }

    impl CannedTransport {
        fn ok(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(Ok(TransportResponse::new(status, body.to_string())))),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn err(kind: TransportErrorKind, message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(Err(TransportError::new(kind, message.to_string())))),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn execute(&self, request: WireRequest) -> Result<TransportResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            self.reply
                .lock()
                .unwrap()
                .take()
                .expect("transport called more than once")
        }
    }

    /// Never completes.
    struct StalledTransport;

    #[async_trait]
    impl Transport for StalledTransport {
        async fn execute(&self, _request: WireRequest) -> Result<TransportResponse, TransportError> {
            std::future::pending().await
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        lines: Mutex<Vec<String>>,
    }

    impl Logger for RecordingLogger {
        fn trace(&self, component: &str, message: &str) {
            self.lines.lock().unwrap().push(format!("trace {component}: {message}"));
        }

        fn debug(&self, component: &str, message: &str) {
            self.lines.lock().unwrap().push(format!("debug {component}: {message}"));
        }
    }

    fn search_page_json() -> String {
        json!({
            "total_count": 1,
            "incomplete_results": false,
            "items": [{
                "id": 1,
                "name": "foo",
                "full_name": "a/foo",
                "owner": {
                    "login": "a",
                    "id": 7,
                    "avatar_url": "https://avatars.githubusercontent.com/u/7",
                    "gravatar_id": "",
                    "url": "https://api.github.com/users/a",
                    "received_events_url": "https://api.github.com/users/a/received_events",
                    "type": "User"
                },
                "private": false,
                "html_url": "https://github.com/a/foo",
                "description": "foo things",
                "fork": false,
                "url": "https://api.github.com/repos/a/foo",
                "created_at": "2018-02-08T00:00:00Z",
                "updated_at": "2018-02-09T00:00:00Z",
                "pushed_at": "2018-02-09T00:00:00Z",
                "homepage": null,
                "size": 3,
                "stargazers_count": 5,
                "watchers_count": 5,
                "language": "Swift",
                "forks_count": 0,
                "open_issues_count": 0,
                "default_branch": "master",
                "score": 12.5
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn success_decodes_search_result() {
        let transport = CannedTransport::ok(200, &search_page_json());
        let executor = RequestExecutor::new(transport.clone());

        let page = executor
            .send(&SearchRepositories::new("Hatena", 1))
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert!(!page.incomplete_results);
        assert_eq!(page.items[0].name, "foo");

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Get);
        assert_eq!(
            seen[0].url.as_str(),
            "https://api.github.com/search/repositories?q=Hatena&page=1"
        );
        assert_eq!(
            seen[0].headers.get("Accept").map(String::as_str),
            Some(GITHUB_V3_MEDIA_TYPE)
        );
    }

    #[test]
    fn origin_defaults_to_github_and_follows_config() {
        let executor = RequestExecutor::new(CannedTransport::ok(200, "{}"));
        assert_eq!(executor.origin().as_str(), "https://api.github.com/");

        let config = ClientConfig {
            api_origin: Url::parse("http://127.0.0.1:9/").unwrap(),
            ..ClientConfig::default()
        };
        let executor = RequestExecutor::from_config(&config).unwrap();
        assert_eq!(executor.origin(), &config.api_origin);
    }

    #[tokio::test]
    async fn origin_override_is_used() {
        let transport = CannedTransport::ok(200, &search_page_json());
        let executor = RequestExecutor::new(transport.clone())
            .with_origin(Url::parse("http://127.0.0.1:8080").unwrap());
        assert_eq!(executor.origin().as_str(), "http://127.0.0.1:8080/");
        executor.send(&SearchRepositories::new("x", 2)).await.unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(
            seen[0].url.as_str(),
            "http://127.0.0.1:8080/search/repositories?q=x&page=2"
        );
    }

    #[tokio::test]
    async fn transport_error_is_surfaced_unchanged() {
        let executor =
            RequestExecutor::new(CannedTransport::err(TransportErrorKind::Connect, "offline"));
        let err = executor
            .send(&SearchRepositories::new("x", 1))
            .await
            .unwrap_err();
        match err {
            ApiError::Transport(e) => {
                assert!(e.is_connect());
                assert_eq!(e.to_string(), "connect error: offline");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_200_is_empty_body() {
        let executor = RequestExecutor::new(CannedTransport::ok(200, ""));
        let err = executor
            .send(&SearchRepositories::new("x", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::EmptyBody), "got {err:?}");
    }

    #[tokio::test]
    async fn bare_array_is_unexpected_response_type() {
        let executor = RequestExecutor::new(CannedTransport::ok(200, "[1, 2, 3]"));
        let err = executor
            .send(&SearchRepositories::new("x", 1))
            .await
            .unwrap_err();
        match err {
            ApiError::UnexpectedResponseType { found } => assert_eq!(found, "array"),
            other => panic!("expected UnexpectedResponseType, got {other:?}"),
        }
    }

    #[test]
    fn non_json_is_unexpected_response_type() {
        let err = decode_body::<ErrorResponse>(b"<html></html>").unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnexpectedResponseType { ref found } if found.starts_with("invalid JSON")
        ));
    }

    #[test]
    fn decode_error_is_surfaced() {
        let body = search_page_json().replace("2018-02-08T00:00:00Z", "not-a-date");
        let err = decode_response::<ghsearch_api::SearchResult<ghsearch::Repository>>(
            TransportResponse::new(200, body),
        )
        .unwrap_err();
        match err {
            ApiError::Decode(DecodeError::UnexpectedValue { key, .. }) => {
                assert_eq!(key, "created_at")
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn github_error_object_becomes_status() {
        let body = r#"{"message":"API rate limit exceeded","documentation_url":"https://docs.github.com/rest"}"#;
        let err = decode_response::<ErrorResponse>(TransportResponse::new(403, body)).unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API rate limit exceeded");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn non_2xx_without_error_object_falls_through() {
        let err = decode_response::<ErrorResponse>(TransportResponse::new(502, "")).unwrap_err();
        assert!(matches!(err, ApiError::EmptyBody));

        let err =
            decode_response::<ErrorResponse>(TransportResponse::new(500, "oops")).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponseType { .. }));
    }

    #[tokio::test]
    async fn logging_does_not_change_the_outcome() {
        let logger = Arc::new(RecordingLogger::default());
        let executor = RequestExecutor::new(CannedTransport::ok(200, "[]"))
            .with_logger(logger.clone());
        let err = executor
            .send(&SearchRepositories::new("x", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponseType { .. }));

        let lines = logger.lines.lock().unwrap();
        assert!(lines[0].starts_with("trace executor: GET https://api.github.com/search"));
        assert!(lines.iter().any(|l| l.contains("decode failed")));
    }

    #[tokio::test]
    async fn dispatch_invokes_callback_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel();

        let executor = RequestExecutor::new(CannedTransport::ok(200, &search_page_json()));
        let counter = Arc::clone(&calls);
        let handle = executor.dispatch(SearchRepositories::new("Hatena", 1), move |result| {
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(result.map(|page| page.total_count));
        });

        assert_eq!(rx.await.unwrap().unwrap(), 1);
        handle.await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn aborted_dispatch_never_calls_back() {
        let calls = Arc::new(AtomicUsize::new(0));
        let executor = RequestExecutor::new(Arc::new(StalledTransport));
        let counter = Arc::clone(&calls);
        let handle = executor.dispatch(SearchRepositories::new("x", 1), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
