//! Unified SDK error types.

use crate::domain::analysis::ClassificationError;
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl HttpError {
    /// Map a non-success status and its body to an error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => HttpError::NotFound(body),
            400..=499 => HttpError::BadRequest(body),
            _ => HttpError::ServerError { status, body },
        }
    }
}

/// Why a single submit failed to produce an analysis result.
///
/// All variants collapse into one user-visible failure message; the variant
/// only matters for diagnostics.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("transport failure: {0}")]
    Transport(#[from] HttpError),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unrecognized response: {0}")]
    Classification(#[from] ClassificationError),
}

impl QueryError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Transport(_) => "transport",
            QueryError::Decode(_) => "decode",
            QueryError::Classification(_) => "classification",
        }
    }
}

/// Rejected session operations. None of these mutate the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("input is empty")]
    EmptyInput,

    #[error("a query is already in flight")]
    Reentrant,

    #[error("a pending placeholder already exists")]
    PlaceholderPending,

    #[error("no pending placeholder to resolve")]
    NoPendingPlaceholder,

    #[error("message index {index} out of range (len {len})")]
    MessageOutOfRange { index: usize, len: usize },

    #[error("message {index} has no chart to toggle")]
    NotToggleable { index: usize },

    #[error("message {index} does not match the toggle address shape")]
    AreaKeyMismatch { index: usize },

    #[error("message {index} has no area '{area}'")]
    UnknownArea { index: usize, area: String },
}

impl SessionError {
    /// Whether this is one of the toggle addressing errors.
    pub fn is_toggle_address(&self) -> bool {
        matches!(
            self,
            SessionError::MessageOutOfRange { .. }
                | SessionError::NotToggleable { .. }
                | SessionError::AreaKeyMismatch { .. }
                | SessionError::UnknownArea { .. }
        )
    }
}
