//! Reconnect policy with capped exponential backoff
//!
//! Delays grow as `initial_delay * multiplier^(attempt - 1)`, capped at
//! `max_delay`, with optional random jitter of up to ±25%.

use std::time::Duration;

use rand::Rng;

/// Configuration for reconnect behavior
#[derive(Debug, Clone, PartialEq)]
pub struct ReconnectPolicy {
    /// Maximum reconnect attempts after a connection is lost (0 disables)
    pub max_attempts: u32,
    /// Delay before the first reconnect attempt
    pub initial_delay: Duration,
    /// Upper bound for the delay between attempts
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Add random jitter to delays
    pub jitter: bool,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl ReconnectPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single connection attempt per `connect()` call
    #[must_use]
    pub fn disabled() -> Self {
        Self::default().with_max_attempts(0)
    }

    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    #[must_use]
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.max_attempts > 0
    }

    /// Delay before reconnect attempt number `attempt` (1-based), or `None`
    /// once the attempts are used up.
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_attempts {
            return None;
        }
        let delay = self.base_delay(attempt);
        if !self.jitter {
            return Some(delay);
        }
        let jitter_range = i64::try_from(delay.as_millis() / 4).unwrap_or(i64::MAX);
        if jitter_range == 0 {
            return Some(delay);
        }
        let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
        let offset = Duration::from_millis(jitter.unsigned_abs());
        Some(if jitter < 0 {
            delay.saturating_sub(offset)
        } else {
            delay.saturating_add(offset)
        })
    }

    fn base_delay(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let base_ms = self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(exponent);
        let capped_ms = base_ms.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped_ms as u64)
    }
}
