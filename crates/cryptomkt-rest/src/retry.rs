//! Retry configuration for the transport loop
//!
//! Defaults to a fixed pause: 5 attempts, 2 seconds apart. Setting a
//! multiplier above 1.0 or a jitter factor turns it into exponential
//! backoff; the attempt bound is unchanged either way.

use std::time::Duration;

/// Default number of attempts per call
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default pause between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Configuration for retrying failed attempts
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts per call, including the first
    pub max_attempts: u32,
    /// Pause after the first failed attempt
    pub delay: Duration,
    /// Growth factor applied per further failure (1.0 keeps the pause fixed)
    pub multiplier: f64,
    /// Upper bound on the pause
    pub max_delay: Duration,
    /// Random jitter factor (0.0 to 1.0)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
            multiplier: 1.0,
            max_delay: Duration::from_secs(30),
            jitter: 0.0,
        }
    }
}

impl RetryConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set total attempts (at least one)
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max.max(1);
        self
    }

    /// Set the pause between attempts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set backoff multiplier
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier.max(1.0);
        self
    }

    /// Set maximum pause
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set jitter factor
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Single attempt, no retries
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Pause before the request is re-sent after failed attempt `attempt` (1-indexed)
    ///
    /// With the default multiplier of 1.0 this is `delay` for every attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let failures_before = attempt.saturating_sub(1) as i32;
        let pause_ms = self.delay.as_millis() as f64 * self.multiplier.powi(failures_before);

        Duration::from_millis(pause_ms as u64).min(self.max_delay)
    }

    /// Spread a pause by up to `jitter` of its length in either direction
    pub fn apply_jitter(&self, pause: Duration) -> Duration {
        if self.jitter == 0.0 {
            return pause;
        }

        let pause_ms = pause.as_millis() as f64;
        let spread = pause_ms * self.jitter;
        let offset = rand::random::<f64>() * 2.0 * spread - spread;

        Duration::from_millis((pause_ms + offset).max(0.0) as u64)
    }

    /// Pause the transport loop sleeps after failed attempt `attempt`
    pub fn delay_with_jitter(&self, attempt: u32) -> Duration {
        self.apply_jitter(self.delay_for_attempt(attempt))
    }

    /// Check if another attempt may follow attempt number `attempt`
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}
