//! MoveOps API Client
//!
//! This crate is the single chokepoint for every call to the MoveOps API:
//! - Credentialed HTTP client with connection pooling and timeouts
//! - CSRF token lifecycle with single-flight acquisition
//! - Typed error normalization from the upstream error envelope
//! - Debounce and cancellation helpers for interactive callers

pub mod client;
pub mod csrf;
pub mod debounce;
pub mod error;
pub mod http;
pub mod token_store;

pub use client::{ApiClient, ApiClientConfig, CsrfPolicy, RequestOptions};
pub use csrf::CsrfManager;
pub use debounce::{CancelToken, Debouncer};
pub use error::{ApiError, Result};
pub use http::{HttpClientConfig, create_client};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
