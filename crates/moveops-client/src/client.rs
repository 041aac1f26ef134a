//! Authenticated API request client
//!
//! Single chokepoint for API traffic: credentials ride on every call via the
//! cookie store, mutating calls get a CSRF token attached transparently
//! (fetched at most once per token lifetime), and every failure is normalized
//! into [`ApiError`]. The client never retries and never navigates; a 401
//! surfaces as [`ApiError::AuthRequired`] for the caller to interpret.

use crate::csrf::CsrfManager;
use crate::error::{ApiError, Result};
use crate::http::{HttpClientConfig, create_client};
use crate::token_store::{MemoryTokenStore, TokenStore};
use moveops_core::{ErrorEnvelope, IdempotencyKey, CSRF_INVALID_CODE, SESSION_EXPIRED_MESSAGE};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument};

pub const CSRF_HEADER: &str = "X-CSRF-Token";
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// How a request acquires its CSRF token.
#[derive(Debug, Clone, Default)]
pub enum CsrfPolicy {
    /// Attach a token when the method is mutating (anything outside
    /// GET/HEAD/OPTIONS), fetching one if needed.
    #[default]
    Auto,
    /// Never attach a token. Only the login call itself uses this; it
    /// precedes token issuance.
    Skip,
    /// Attach the given token verbatim.
    Provided(String),
}

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub csrf: CsrfPolicy,
    /// A 401 normally surfaces as [`ApiError::AuthRequired`]; session probes
    /// where "not logged in" is an expected outcome set this to get a plain
    /// status error instead.
    pub suppress_auth_redirect: bool,
    /// Key for create/convert deduplication, created once per user action by
    /// the caller. The client never generates one per attempt.
    pub idempotency_key: Option<IdempotencyKey>,
    /// Extra headers. Anything set here wins; the client never overrides a
    /// caller-supplied header, including `Content-Type`.
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn suppressing_auth_redirect() -> Self {
        Self {
            suppress_auth_redirect: true,
            ..Default::default()
        }
    }

    pub fn without_csrf() -> Self {
        Self {
            csrf: CsrfPolicy::Skip,
            ..Default::default()
        }
    }

    pub fn with_idempotency_key(key: IdempotencyKey) -> Self {
        Self {
            idempotency_key: Some(key),
            ..Default::default()
        }
    }
}

/// Client configuration
#[derive(Clone)]
pub struct ApiClientConfig {
    /// API base URL, typically the same-origin proxy prefix in production or
    /// the API itself in local dev (e.g. `http://localhost:8080/api`).
    pub base_url: String,
    pub http: HttpClientConfig,
    pub token_store: Arc<dyn TokenStore>,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: HttpClientConfig::default(),
            token_store: Arc::new(MemoryTokenStore::new()),
        }
    }

    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = store;
        self
    }

    pub fn with_http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    csrf: CsrfManager,
}

fn is_mutating(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

impl ApiClient {
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Config("API base URL must not be empty".to_string()));
        }
        let http = create_client(&config.http)?;
        let csrf = CsrfManager::new(http.clone(), &base_url, config.token_store);
        Ok(Self {
            http,
            base_url,
            csrf,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The CSRF manager, for logout flows that must invalidate the token.
    pub fn csrf(&self) -> &CsrfManager {
        &self.csrf
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn prepare(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<RequestBuilder> {
        let mut builder = self.http.request(method.clone(), self.url(path));
        builder = builder.headers(options.headers.clone());

        if let Some(key) = &options.idempotency_key {
            builder = builder.header(IDEMPOTENCY_HEADER, key.as_str());
        }

        let caller_set_token = options.headers.contains_key(CSRF_HEADER);
        let token = match &options.csrf {
            CsrfPolicy::Skip => None,
            CsrfPolicy::Provided(token) => Some(token.clone()),
            CsrfPolicy::Auto if is_mutating(&method) && !caller_set_token => {
                Some(self.csrf.token(false).await?)
            }
            CsrfPolicy::Auto => None,
        };
        if let Some(token) = token {
            builder = builder.header(CSRF_HEADER, token);
        }

        Ok(builder)
    }

    /// Map a non-success response into the normalized error. Consumes the
    /// body; tolerates it being empty or not the envelope shape.
    async fn to_api_error(&self, response: Response, options: &RequestOptions) -> ApiError {
        let status = response.status().as_u16();
        let fallback = format!("HTTP {}", status);
        let bytes = response.bytes().await.unwrap_or_default();

        let (mut message, code, details) = match ErrorEnvelope::from_bytes(&bytes) {
            Some(envelope) => (
                envelope.error.message,
                envelope.error.code,
                envelope.error.details,
            ),
            None => (fallback, None, None),
        };

        if status == 403 && code.as_deref() == Some(CSRF_INVALID_CODE) {
            // The cached token is dead; the next mutating call re-fetches.
            message = SESSION_EXPIRED_MESSAGE.to_string();
            self.csrf.invalidate();
        }

        if status == 401 && !options.suppress_auth_redirect {
            return ApiError::AuthRequired { message };
        }

        ApiError::Api {
            status,
            message,
            code,
            details,
        }
    }

    async fn dispatch(
        &self,
        builder: RequestBuilder,
        options: &RequestOptions,
    ) -> Result<Response> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(self.to_api_error(response, options).await)
        }
    }

    /// Issue a request with a JSON body (or none) and parse the JSON result.
    /// A 204 resolves without touching the body; `T` must accept `null`
    /// (use `()` for no-content endpoints).
    #[instrument(skip_all, fields(%method, path))]
    pub async fn request_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = self.prepare(method, path, &options).await?;

        if let Some(body) = body {
            let payload = serde_json::to_vec(body)?;
            if !options.headers.contains_key(CONTENT_TYPE) {
                builder = builder.header(CONTENT_TYPE, "application/json");
            }
            builder = builder.body(payload);
        }

        let response = self.dispatch(builder, &options).await?;

        if response.status() == StatusCode::NO_CONTENT {
            debug!("204 response, skipping body parse");
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(response.json::<T>().await?)
    }

    /// GET shorthand for the common no-body case.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        self.request_json::<T, ()>(Method::GET, path, None, options)
            .await
    }

    /// Issue a multipart request (imports). The multipart boundary content
    /// type is set by the form itself and never overridden.
    #[instrument(skip_all, fields(%method, path))]
    pub async fn request_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: reqwest::multipart::Form,
        options: RequestOptions,
    ) -> Result<T> {
        let builder = self.prepare(method, path, &options).await?.multipart(form);
        let response = self.dispatch(builder, &options).await?;
        Ok(response.json::<T>().await?)
    }

    /// Identical credential/CSRF/error semantics to [`Self::request_json`],
    /// but hands back the raw response for binary payload extraction.
    #[instrument(skip_all, fields(%method, path))]
    pub async fn request_raw(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response> {
        let builder = self.prepare(method, path, &options).await?;
        self.dispatch(builder, &options).await
    }
}
