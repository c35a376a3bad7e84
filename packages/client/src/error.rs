//! Errors surfaced by the request executor.

use ghsearch::DecodeError;

use crate::transport::TransportError;

/// Everything that can go wrong between describing a request and holding
/// its typed response. Each variant is terminal for that one request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The endpoint path could not be joined onto the API origin.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A non-2xx status whose body was a GitHub error object.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The transport succeeded but returned no payload.
    #[error("response body is empty")]
    EmptyBody,

    /// The payload is not a JSON object. `found` is the JSON kind of the
    /// payload, or a description of why it is not JSON at all.
    #[error("response is not a JSON object (found {found})")]
    UnexpectedResponseType { found: String },

    /// The payload is an object but does not decode into the response type.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type ApiResult<T> = Result<T, ApiError>;
