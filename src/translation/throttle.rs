/*!
 * Global pacing gate for provider calls.
 *
 * Every translation request, from every worker pool, passes through one
 * shared gate that enforces a minimum interval between dispatches. The
 * last-dispatch timestamp is the one piece of truly shared mutable state
 * in the pipeline and must stay serialized; the async mutex is held across
 * the sleep so concurrent callers queue instead of racing the timestamp.
 */

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Minimum-interval gate shared across all translation pools
pub struct Throttle {
    /// Minimum gap between successive dispatches
    min_interval: Duration,

    /// Timestamp of the last dispatch
    last_dispatch: Mutex<Option<Instant>>,
}

impl Throttle {
    /// Create a gate with the given minimum interval in milliseconds
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval: Duration::from_millis(min_interval_ms),
            last_dispatch: Mutex::new(None),
        }
    }

    /// Wait until at least the minimum interval has passed since the last
    /// dispatch, then record this dispatch. The timestamp is updated
    /// unconditionally after the sleep.
    pub async fn pace(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let mut last = self.last_dispatch.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Minimum interval this gate enforces
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
