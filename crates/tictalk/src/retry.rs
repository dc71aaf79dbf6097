//! Bounded retry policy for oracle calls.

use std::time::Duration;
use tracing::debug;

/// Bounded retry: at most `max_attempts` total tries with a fixed
/// pause between attempts.
///
/// The pause is an async sleep, so it is a yield point rather than a
/// thread-blocking wait. Retries are sequential; there is no fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt bound and inter-attempt delay.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Maximum number of total attempts.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay between attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Pauses before the next attempt.
    pub async fn pause(&self) {
        debug!(delay_ms = self.delay.as_millis() as u64, "Pausing before retry");
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for RetryPolicy {
    /// Three attempts, one second apart.
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}
