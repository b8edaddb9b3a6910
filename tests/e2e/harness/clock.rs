use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Start of every scenario clock: 2023-11-14T22:13:20Z in milliseconds.
pub const EPOCH_MS: i64 = 1_700_000_000_000;

/// Controllable time for open-time and recency testing.
///
/// This clock can be passed to a workspace via `with_time_provider()` so
/// that open times are deterministic.
#[derive(Clone)]
pub struct MockClock {
    current: Arc<AtomicI64>,
}

impl MockClock {
    /// Creates a time provider function suitable for passing to a workspace.
    pub fn as_provider(&self) -> impl Fn() -> i64 + Send + Sync + 'static {
        let current = self.current.clone();
        move || current.load(Ordering::SeqCst)
    }
}

impl MockClock {
    /// Create a new mock clock starting at [`EPOCH_MS`]
    pub fn new() -> Self {
        Self::starting_at(EPOCH_MS)
    }

    pub fn starting_at(ms: i64) -> Self {
        Self {
            current: Arc::new(AtomicI64::new(ms)),
        }
    }

    /// Get current timestamp in milliseconds
    pub fn now(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }

    /// Advance time by duration
    pub fn advance(&self, duration: Duration) {
        self.current
            .fetch_add(duration.as_millis() as i64, Ordering::SeqCst);
    }

    /// Move time backwards, as after a clock adjustment
    pub fn rewind(&self, duration: Duration) {
        self.current
            .fetch_sub(duration.as_millis() as i64, Ordering::SeqCst);
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}
