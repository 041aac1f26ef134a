//! MoveOps Domain API Modules
//!
//! Thin typed wrappers over the request client, one function per upstream
//! API operation:
//! - auth/session (login, me, csrf, logout)
//! - estimates (create, get, update, convert)
//! - jobs (get, update)
//! - calendar (range query)
//! - storage (list, get, create, update)
//! - import/export (multipart dry-run/apply, reports, file downloads)

pub mod calendar;
pub mod download;
pub mod estimates;
pub mod import_export;
pub mod jobs;
pub mod session;
pub mod storage;

pub use download::Download;

use moveops_client::ApiError;

/// Unwrap a normalized client error to a display string for toasts and
/// inline error states.
pub fn api_error_message(error: &ApiError) -> String {
    error.message()
}
