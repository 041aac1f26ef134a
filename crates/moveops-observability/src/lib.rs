//! MoveOps Observability
//!
//! Structured logging, Prometheus metrics, and health endpoints for the
//! proxy server.

pub mod health;
pub mod logging;
pub mod metrics;

pub use health::{HealthState, ReadinessChecker, health_router};
pub use metrics::Metrics;
