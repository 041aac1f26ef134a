//! Normalized client-side error type
//!
//! Every failure from the request client collapses into [`ApiError`]. A 401
//! is surfaced as the distinguished [`ApiError::AuthRequired`] signal so the
//! calling layer decides how to navigate; the transport never redirects on
//! its own.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response normalized from the upstream error envelope. The
    /// message falls back to `HTTP <status>` when the body is absent or
    /// unparseable.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
        details: Option<serde_json::Value>,
    },

    /// The session is gone (HTTP 401) and the caller did not suppress the
    /// signal. Callers are expected to route the user to the login page.
    #[error("Authentication required: {message}")]
    AuthRequired { message: String },

    /// Network-level failure. Never retried.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status carried by the error, when one applies.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::AuthRequired { .. } => Some(401),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Machine-readable code from the error envelope, if present.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// 403 without redirect semantics; UIs render a not-authorized state.
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Display string for toasts and inline error states.
    pub fn message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            ApiError::AuthRequired { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
