//! Unified error types for the web client toolkit.

use thiserror::Error;

/// Top-level toolkit error.
#[derive(Error, Debug)]
pub enum WebError {
    #[error("Routing error: {0}")]
    Route(#[from] RouteError),

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Locale error: {0}")]
    Locale(#[from] LocaleError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Route registration errors.
///
/// All of these surface at `register` time — a pattern that parses is
/// matchable forever, so navigation itself never fails with `RouteError`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("Empty route pattern")]
    EmptyPattern,

    #[error("Pattern must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("Empty segment in pattern: {0}")]
    EmptySegment(String),

    #[error("Named segment with empty name in pattern: {0}")]
    EmptyParamName(String),
}

/// HTTP-layer errors.
#[cfg(feature = "http")]
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Unexpected response body: {0}")]
    UnexpectedBody(#[from] serde_json::Error),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Localization errors.
#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Invalid catalog for {locale}: {source}")]
    InvalidCatalog {
        locale: String,
        source: serde_json::Error,
    },
}
