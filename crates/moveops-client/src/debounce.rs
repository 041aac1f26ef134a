//! Interactive-call helpers
//!
//! Two small tools for callers driven by rapid user input:
//! - [`Debouncer`] coalesces a burst of triggers into one call per quiet
//!   period (filter-as-you-type search).
//! - [`CancelToken`] is the cancellation-by-flag pattern: a token captured at
//!   call start, checked before committing results, so responses arriving
//!   after their originating view is gone are discarded rather than applied.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Default quiet period for search inputs.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Coalesces concurrent triggers: only the latest trigger's operation runs
/// once the quiet period elapses; superseded triggers resolve to `None`.
#[derive(Clone)]
pub struct Debouncer {
    quiet: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait out the quiet period, then run `op` only if no newer trigger
    /// arrived in the meantime.
    pub async fn debounce<F, Fut, T>(&self, op: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.quiet).await;
        if self.generation.load(Ordering::SeqCst) != mine {
            return None;
        }
        Some(op().await)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

/// Shared flag tying an in-flight operation to the scope that started it.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the originating scope as torn down.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Gate a result on the scope still being alive: `None` means the value
    /// must be dropped, not committed to state.
    pub fn accept<T>(&self, value: T) -> Option<T> {
        if self.is_cancelled() { None } else { Some(value) }
    }
}
