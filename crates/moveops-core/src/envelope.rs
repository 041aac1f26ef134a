//! API error envelope
//!
//! Every non-2xx response from the upstream API carries a structured body of
//! the form `{"error": {"message", "code", "details"}}`. The client layer
//! parses this tolerantly: an empty or non-JSON body falls back to a generic
//! `HTTP <status>` message.

use serde::{Deserialize, Serialize};

/// Machine-readable code the upstream attaches to CSRF-rejected requests.
pub const CSRF_INVALID_CODE: &str = "CSRF_INVALID";

/// Fixed user-facing message substituted for a CSRF rejection, regardless of
/// the envelope's original message text.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please refresh and sign in again.";

/// The upstream error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Parse an envelope from raw response bytes, returning `None` when the
    /// body is empty, not JSON, or not envelope-shaped.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        serde_json::from_slice(bytes).ok()
    }
}
