//! Client configuration, populated from environment variables.

use std::sync::LazyLock;
use std::time::Duration;

use ghsearch_api::GITHUB_API_ORIGIN;
use url::Url;

pub(crate) static GITHUB_ORIGIN: LazyLock<Url> =
    LazyLock::new(|| Url::parse(GITHUB_API_ORIGIN).expect("invalid GitHub API origin"));

/// Errors from [`ClientConfig::from_env`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GHSEARCH_API_ORIGIN must be an absolute URL, got {value:?}: {source}")]
    InvalidOrigin {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("GHSEARCH_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

/// Runtime configuration for the request executor.
///
/// All fields are populated from environment variables with defaults that
/// target the public GitHub API, so a client works with zero configuration.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `GHSEARCH_API_ORIGIN` | `https://api.github.com` | Origin endpoint paths are joined against |
/// | `GHSEARCH_TIMEOUT_SECS` | `30` | Whole-request timeout |
/// | `GHSEARCH_USER_AGENT` | `ghsearch/<version>` | `User-Agent` header (GitHub rejects requests without one) |
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_origin: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_origin: GITHUB_ORIGIN.clone(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("ghsearch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Populate config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("GHSEARCH_API_ORIGIN") {
            config.api_origin = Url::parse(&value)
                .map_err(|source| ConfigError::InvalidOrigin { value, source })?;
        }

        if let Some(value) = lookup("GHSEARCH_TIMEOUT_SECS") {
            let secs = value
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::InvalidTimeout(value))?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(value) = lookup("GHSEARCH_USER_AGENT") {
            config.user_agent = value;
        }

        Ok(config)
    }
}
