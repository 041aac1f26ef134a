//! Persisted CSRF token slot
//!
//! The in-memory token cache survives only as long as the process; the store
//! is the slot that survives a restart within the same session (the desktop
//! analogue of a browser's sessionStorage). Reads are tolerant: a missing or
//! corrupt slot means "no token", never an error.

use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

const TOKEN_FIELD: &str = "csrfToken";

/// Storage interface for the persisted token. Swappable so non-desktop
/// targets can plug in a request-scoped or no-op implementation.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Process-local store; nothing survives a restart.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().expect("token slot poisoned").clone()
    }

    fn save(&self, token: &str) {
        *self.slot.lock().expect("token slot poisoned") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.lock().expect("token slot poisoned") = None;
    }
}

/// JSON-file-backed store, `{"csrfToken": "..."}` on disk.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        if !self.path.exists() {
            debug!("Token file does not exist: {}", self.path.display());
            return None;
        }
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read token file {}: {}", self.path.display(), e);
                return None;
            }
        };
        let json: Value = match serde_json::from_str(&contents) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to parse token file {}: {}", self.path.display(), e);
                return None;
            }
        };
        match json.get(TOKEN_FIELD) {
            Some(Value::String(token)) if !token.is_empty() => Some(token.clone()),
            _ => None,
        }
    }

    fn save(&self, token: &str) {
        let payload = serde_json::json!({ TOKEN_FIELD: token });
        if let Err(e) = fs::write(&self.path, payload.to_string()) {
            warn!("Failed to persist token to {}: {}", self.path.display(), e);
        }
    }

    fn clear(&self) {
        if self.path.exists()
            && let Err(e) = fs::remove_file(&self.path)
        {
            warn!("Failed to clear token file {}: {}", self.path.display(), e);
        }
    }
}
