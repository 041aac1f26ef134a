//! Router assembly: health endpoints in front, proxy fallback behind

use axum::Router;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use moveops_observability::{HealthState, Metrics, ReadinessChecker, health_router};
use moveops_proxy::{Upstream, middleware, proxy_router};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::ServerConfig;

const READINESS_PROBE_INTERVAL: Duration = Duration::from_secs(30);

/// Readiness based on a background probe of the upstream API.
///
/// Any HTTP answer counts as reachable, including 4xx; only connection-level
/// failure marks the upstream down.
pub struct UpstreamReadiness {
    reachable: Arc<AtomicBool>,
}

impl UpstreamReadiness {
    pub fn spawn(base_url: String) -> Arc<Self> {
        let reachable = Arc::new(AtomicBool::new(true));
        let flag = reachable.clone();

        tokio::spawn(async move {
            let client = reqwest::Client::new();
            loop {
                let up = client.get(&base_url).send().await.is_ok();
                flag.store(up, Ordering::Relaxed);
                debug!(up, "upstream readiness probe");
                tokio::time::sleep(READINESS_PROBE_INTERVAL).await;
            }
        });

        Arc::new(Self { reachable })
    }
}

impl ReadinessChecker for UpstreamReadiness {
    fn is_ready(&self) -> bool {
        self.reachable.load(Ordering::Relaxed)
    }
}

async fn metrics_middleware(metrics: Arc<Metrics>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    metrics.record_request(&method, response.status().as_u16(), start.elapsed());
    response
}

/// Build the full application router.
pub fn build_app(
    config: &ServerConfig,
    upstream: Upstream,
    metrics: Arc<Metrics>,
    readiness: Option<Arc<dyn ReadinessChecker>>,
) -> Router {
    let health_state = match readiness {
        Some(checker) => HealthState::with_readiness_checker(metrics.clone(), checker),
        None => HealthState::new(metrics.clone()),
    };

    let max_body_bytes = config.limits.max_body_bytes;

    let proxy = proxy_router(Arc::new(upstream))
        .layer(axum::middleware::from_fn(move |req, next| {
            middleware::body_size_limit_middleware(req, next, max_body_bytes)
        }))
        .layer(axum::middleware::from_fn({
            let metrics = metrics.clone();
            move |req, next| metrics_middleware(metrics.clone(), req, next)
        }));

    // Health routes match first; everything else falls through to the proxy.
    health_router(health_state)
        .merge(proxy)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
}
