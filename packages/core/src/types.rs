//! Domain entities returned by the GitHub search API.
//!
//! Field keys are the ones GitHub's v3 API emits. Fields are decoded in the
//! order they are declared here, which is also the order in which a decode
//! error is discovered.

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::convert::ObjectConverter;
use crate::decode::{Convertible, Decodable};
use crate::error::DecodeError;
use crate::object::JsonObject;

/// The account that owns a repository.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Owner {
    pub login: String,
    pub id: i64,
    pub avatar_url: Url,
    /// Usually empty; GitHub still sends the key.
    pub gravatar_id: String,
    /// API URL of the account.
    pub url: Url,
    pub received_events_url: Url,
    /// `"User"` or `"Organization"`.
    #[serde(rename = "type")]
    pub account_type: String,
}

impl Decodable for Owner {
    fn decode(json: &JsonObject<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            login: json.get("login")?,
            id: json.get("id")?,
            avatar_url: json.get("avatar_url")?,
            gravatar_id: json.get("gravatar_id")?,
            url: json.get("url")?,
            received_events_url: json.get("received_events_url")?,
            account_type: json.get("type")?,
        })
    }
}

impl Convertible for Owner {
    type Converter = ObjectConverter<Self>;
}

/// A repository as it appears in search results.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    pub owner: Owner,
    #[serde(rename = "private")]
    pub is_private: bool,
    /// Canonical browser URL.
    pub html_url: Url,
    pub description: Option<String>,
    pub fork: bool,
    /// API URL.
    pub url: Url,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Absent for repositories that were never pushed to.
    pub pushed_at: Option<DateTime<Utc>>,
    pub homepage: Option<String>,
    /// Size in kilobytes.
    pub size: i64,
    pub stargazers_count: i64,
    pub watchers_count: i64,
    pub language: Option<String>,
    pub forks_count: i64,
    pub open_issues_count: i64,
    pub default_branch: String,
    /// Search relevance score.
    pub score: f64,
}

impl Decodable for Repository {
    fn decode(json: &JsonObject<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: json.get("id")?,
            name: json.get("name")?,
            full_name: json.get("full_name")?,
            owner: json.get("owner")?,
            is_private: json.get("private")?,
            html_url: json.get("html_url")?,
            description: json.get_optional("description")?,
            fork: json.get("fork")?,
            url: json.get("url")?,
            created_at: json.get("created_at")?,
            updated_at: json.get("updated_at")?,
            pushed_at: json.get_optional("pushed_at")?,
            homepage: json.get_optional("homepage")?,
            size: json.get("size")?,
            stargazers_count: json.get("stargazers_count")?,
            watchers_count: json.get("watchers_count")?,
            language: json.get_optional("language")?,
            forks_count: json.get("forks_count")?,
            open_issues_count: json.get("open_issues_count")?,
            default_branch: json.get("default_branch")?,
            score: json.get("score")?,
        })
    }
}

impl Convertible for Repository {
    type Converter = ObjectConverter<Self>;
}

// --- tests -------------------------------------------------------------------
