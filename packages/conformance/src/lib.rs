//! Shared helpers for the ghsearch end-to-end suite.
//!
//! Provides [`spawn_mock_github`], which serves an axum router on an
//! ephemeral loopback port so tests can point a real `reqwest`-backed
//! [`RequestExecutor`] at it, plus fixture builders that produce payloads
//! shaped like the live `/search/repositories` API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use ghsearch_client::{ClientConfig, ReqwestTransport, RequestExecutor};
use serde_json::{json, Value};
use url::Url;

/// Start `router` on `127.0.0.1:0` in a background task and return its
/// origin, e.g. `http://127.0.0.1:51234/`.
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound.
pub async fn spawn_mock_github(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("mock github error");
    });

    Url::parse(&format!("http://{addr}/")).expect("loopback origin")
}

/// An origin nothing is listening on.
pub async fn dead_origin() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/")).expect("loopback origin")
}

/// A `reqwest`-backed executor aimed at `origin` with a short timeout.
pub fn executor_for(origin: Url) -> RequestExecutor {
    executor_with_timeout(origin, Duration::from_secs(5))
}

/// Like [`executor_for`], with an explicit whole-request timeout.
pub fn executor_with_timeout(origin: Url, timeout: Duration) -> RequestExecutor {
    let config = ClientConfig {
        api_origin: origin,
        timeout,
        user_agent: "ghsearch-conformance".into(),
    };
    let transport = ReqwestTransport::from_config(&config).expect("build reqwest client");
    RequestExecutor::new(Arc::new(transport)).with_origin(config.api_origin)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A repository object with every field the live API returns for a hit.
/// `full_name` must be `owner/name`.
pub fn repository_json(id: i64, full_name: &str) -> Value {
    let (login, name) = full_name.split_once('/').unwrap_or(("octocat", full_name));
    json!({
        "id": id,
        "name": name,
        "full_name": full_name,
        "owner": {
            "login": login,
            "id": id * 10,
            "avatar_url": format!("https://avatars.githubusercontent.com/u/{}?v=3", id * 10),
            "gravatar_id": "",
            "url": format!("https://api.github.com/users/{login}"),
            "received_events_url": format!("https://api.github.com/users/{login}/received_events"),
            "type": "User"
        },
        "private": false,
        "html_url": format!("https://github.com/{full_name}"),
        "description": format!("{name} description"),
        "fork": false,
        "url": format!("https://api.github.com/repos/{full_name}"),
        "created_at": "2014-05-09T13:47:34Z",
        "updated_at": "2016-01-21T05:29:07Z",
        "pushed_at": "2015-11-24T09:42:11Z",
        "homepage": null,
        "size": 184,
        "stargazers_count": 42,
        "watchers_count": 42,
        "language": "Swift",
        "forks_count": 3,
        "open_issues_count": 1,
        "default_branch": "master",
        "score": 18.5
    })
}

/// Wrap `items` in a search result envelope.
pub fn search_page(total_count: i64, items: Vec<Value>) -> Value {
    json!({
        "total_count": total_count,
        "incomplete_results": false,
        "items": items
    })
}

/// The GitHub error object returned alongside 4xx statuses.
pub fn error_json(message: &str) -> Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest/search/search"
    })
}
