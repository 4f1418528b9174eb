//! Cancellation token for the jiggler loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound on how long a stop request can go unnoticed during a wait.
pub const POLL_GRANULARITY: Duration = Duration::from_millis(50);

/// Shared stop flag.
///
/// Clones observe the same flag. Each loop gets its own token, so loops
/// running side by side (e.g. in tests) do not stop each other.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop. Safe to call from a signal handler thread.
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Sleeps for `timeout` in slices of at most [`POLL_GRANULARITY`].
    ///
    /// Returns `true` if a stop was requested before the timeout elapsed.
    /// A timeout too large to represent as an `Instant` waits for a stop only.
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);

        loop {
            if self.is_stopped() {
                return true;
            }
            let slice = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    (deadline - now).min(POLL_GRANULARITY)
                }
                None => POLL_GRANULARITY,
            };
            thread::sleep(slice);
        }
    }
}
