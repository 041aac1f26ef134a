//! Same-origin reverse proxy for the MoveOps web tier
//!
//! Browser requests arrive on the web origin under `/api/*` and are forwarded
//! to the back-office API so that session cookies stay first-party. The proxy
//! is deliberately thin: no caching, no retries, no response rewriting beyond
//! what correct forwarding requires.

pub mod forward;
pub mod middleware;

pub use forward::{
    ProxyError, Upstream, proxy_router, resolve_upstream_base, DEFAULT_UPSTREAM_BASE,
};
