//! Idempotency keys for unsafe create/convert operations
//!
//! A key is generated once per user-initiated action, immediately before the
//! call, and threaded through every delivery of that action. It is never
//! reused for a distinct action and never regenerated per retry attempt; the
//! upstream deduplicates on it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-generated unique token attached as the `Idempotency-Key` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Generate a fresh key for one logical action. The prefix names the
    /// action kind ("estimate", "convert", ...) for server-side log legibility.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, Uuid::new_v4()))
    }

    /// Wrap an existing key, e.g. one restored while replaying an action.
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
