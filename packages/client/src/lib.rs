//! Request executor for the GitHub search API.
//!
//! Wires endpoint descriptors from `ghsearch-api` to an HTTP transport and
//! decodes responses with the `ghsearch` decoder.
//!
//! ```rust,ignore
//! use ghsearch_api::SearchRepositories;
//! use ghsearch_client::{ClientConfig, RequestExecutor};
//!
//! let executor = RequestExecutor::from_config(&ClientConfig::from_env()?)?;
//! let page = executor.send(&SearchRepositories::new("language:rust", 1)).await?;
//! for repo in &page.items {
//!     println!("{} ★ {}", repo.full_name, repo.stargazers_count);
//! }
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod logger;
pub mod transport;

pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use executor::{decode_body, decode_response, RequestExecutor};
pub use logger::{Logger, NoopLogger, TracingLogger};
pub use transport::{
    ReqwestTransport, Transport, TransportError, TransportErrorKind, TransportResponse,
};
