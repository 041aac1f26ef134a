//! MoveOps Core Types
//!
//! This crate provides the fundamental types shared across the MoveOps gateway:
//! - API error envelope (the upstream wire contract for failures)
//! - Domain transport types (sessions, estimates, jobs, calendar, storage, imports)
//! - Idempotency key generation

pub mod envelope;
pub mod idempotency;
pub mod types;

pub use envelope::{CSRF_INVALID_CODE, ErrorBody, ErrorEnvelope, SESSION_EXPIRED_MESSAGE};
pub use idempotency::IdempotencyKey;
