//! Error types for bulletin.

use thiserror::Error;

/// Errors that can occur while rendering newsletters or talking to the
/// surrounding collaborators.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A request field is malformed or out of range.
    #[error("Validation failed for `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Template identifier is not one of the registered names.
    #[error("Unknown template type: {0}")]
    UnknownTemplate(String),

    /// Malformed substitution template (unbalanced braces, unknown helper,
    /// unclosed block). Always propagated; raw placeholder text is never
    /// silently emitted.
    #[error("Template syntax error: {0}")]
    TemplateSyntax(String),

    /// The membership directory rejected the supplied credentials.
    ///
    /// Intentionally carries no detail about which field was wrong.
    #[error("Authentication rejected by membership directory")]
    UpstreamAuth,

    /// The membership directory or user store could not be reached.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A user could not be found in the membership directory.
    #[error("User {0} not found in membership directory")]
    UserNotFound(String),

    /// A session token failed verification (bad signature, expired, garbled).
    #[error("Invalid session token: {0}")]
    InvalidSession(String),

    /// Error from the local user mirror store.
    #[error("Store error: {0}")]
    Store(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl Error {
    /// Create a validation error for a named field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

#[cfg(feature = "directory")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::UpstreamUnavailable(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
