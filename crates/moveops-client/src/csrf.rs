//! CSRF token manager
//!
//! Token lifecycle: absent -> pending -> cached; logout or a CSRF rejection
//! moves it back to absent. Acquisition is single-flight: concurrent callers
//! at cold start share one fetch instead of each hitting the token endpoint.

use crate::error::{ApiError, Result};
use crate::token_store::TokenStore;
use moveops_core::types::CsrfResponse;
use reqwest::Client;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub struct CsrfManager {
    http: Client,
    endpoint: String,
    cached: Mutex<Option<String>>,
    // Serializes token fetches. Held across the network call; the
    // double-check after acquisition is what makes acquisition single-flight.
    fetch_lock: tokio::sync::Mutex<()>,
    store: Arc<dyn TokenStore>,
}

impl CsrfManager {
    /// `base_url` is the API base the client talks to; the token endpoint is
    /// `<base>/auth/csrf`.
    pub fn new(http: Client, base_url: &str, store: Arc<dyn TokenStore>) -> Self {
        Self {
            http,
            endpoint: format!("{}/auth/csrf", base_url.trim_end_matches('/')),
            cached: Mutex::new(None),
            fetch_lock: tokio::sync::Mutex::new(()),
            store,
        }
    }

    /// Copy of the in-memory token, if any. Never touches the network.
    pub fn cached(&self) -> Option<String> {
        self.cached.lock().expect("csrf cache poisoned").clone()
    }

    /// Repopulate the in-memory cache from the persisted slot if empty,
    /// skipping one round trip after a restart within a live session.
    pub fn hydrate(&self) {
        let mut cached = self.cached.lock().expect("csrf cache poisoned");
        if cached.is_none()
            && let Some(token) = self.store.load()
        {
            debug!("Hydrated CSRF token from persisted slot");
            *cached = Some(token);
        }
    }

    /// Return the session's anti-forgery token, fetching it at most once no
    /// matter how many callers arrive concurrently. `force` bypasses the
    /// cache and always issues a fresh fetch.
    pub async fn token(&self, force: bool) -> Result<String> {
        if !force {
            self.hydrate();
            if let Some(token) = self.cached() {
                return Ok(token);
            }
        }

        let _guard = self.fetch_lock.lock().await;

        // Another caller may have completed the fetch while we waited.
        if !force && let Some(token) = self.cached() {
            return Ok(token);
        }

        debug!("Fetching CSRF token from {}", self.endpoint);
        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            // The guard drops here too, so a later call can retry.
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: format!("HTTP {}", status.as_u16()),
                code: None,
                details: None,
            });
        }

        let payload: CsrfResponse = response.json().await?;
        *self.cached.lock().expect("csrf cache poisoned") = Some(payload.csrf_token.clone());
        self.store.save(&payload.csrf_token);
        Ok(payload.csrf_token)
    }

    /// Drop both the in-memory and persisted copies. Called on logout and on
    /// a CSRF-rejection response.
    pub fn invalidate(&self) {
        *self.cached.lock().expect("csrf cache poisoned") = None;
        self.store.clear();
        debug!("CSRF token invalidated");
    }
}
