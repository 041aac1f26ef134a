//! Metrics collection with Prometheus
//!
//! Counters and histograms for proxied traffic:
//! - Request counts (total, success, failure by method and status class)
//! - End-to-end proxy latency
//! - Upstream failures (502s), by error kind

use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for the MoveOps proxy
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    /// Total requests forwarded
    pub requests_total: CounterVec,
    /// Requests that came back with a 2xx/3xx status
    pub requests_success: CounterVec,
    /// Requests that came back 4xx/5xx or failed outright
    pub requests_failure: CounterVec,
    /// End-to-end forwarding duration
    pub request_duration_seconds: HistogramVec,
    /// Upstream connection/timeout failures
    pub upstream_errors_total: CounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = CounterVec::new(
            Opts::new("moveops_requests_total", "Total number of proxied requests"),
            &["method"],
        )?;

        let requests_success = CounterVec::new(
            Opts::new(
                "moveops_requests_success_total",
                "Total number of successful proxied requests",
            ),
            &["method", "status"],
        )?;

        let requests_failure = CounterVec::new(
            Opts::new(
                "moveops_requests_failure_total",
                "Total number of failed proxied requests",
            ),
            &["method", "status"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "moveops_request_duration_seconds",
                "Proxied request duration in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
            &["method"],
        )?;

        let upstream_errors_total = CounterVec::new(
            Opts::new(
                "moveops_upstream_errors_total",
                "Upstream connection and timeout failures",
            ),
            &["kind"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(requests_success.clone()))?;
        registry.register(Box::new(requests_failure.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(upstream_errors_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            requests_total,
            requests_success,
            requests_failure,
            request_duration_seconds,
            upstream_errors_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record one completed forward. Status 0 means the upstream never answered.
    pub fn record_request(&self, method: &str, status: u16, duration: Duration) {
        self.requests_total.with_label_values(&[method]).inc();
        self.request_duration_seconds
            .with_label_values(&[method])
            .observe(duration.as_secs_f64());

        let status_label = status.to_string();
        if (200..400).contains(&status) {
            self.requests_success
                .with_label_values(&[method, &status_label])
                .inc();
        } else {
            self.requests_failure
                .with_label_values(&[method, &status_label])
                .inc();
        }
    }

    pub fn record_upstream_error(&self, kind: &str) {
        self.upstream_errors_total.with_label_values(&[kind]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_record_request_classifies_status() {
        let metrics = Metrics::new().unwrap();

        metrics.record_request("GET", 200, Duration::from_millis(12));
        metrics.record_request("POST", 502, Duration::from_millis(40));

        assert_eq!(
            metrics
                .requests_success
                .with_label_values(&["GET", "200"])
                .get(),
            1.0
        );
        assert_eq!(
            metrics
                .requests_failure
                .with_label_values(&["POST", "502"])
                .get(),
            1.0
        );
        assert_eq!(metrics.requests_total.with_label_values(&["GET"]).get(), 1.0);
    }

    #[test]
    fn test_record_upstream_error() {
        let metrics = Metrics::new().unwrap();
        metrics.record_upstream_error("connect");
        metrics.record_upstream_error("connect");
        assert_eq!(
            metrics
                .upstream_errors_total
                .with_label_values(&["connect"])
                .get(),
            2.0
        );
    }
}
