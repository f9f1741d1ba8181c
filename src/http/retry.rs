//! Retry policies for HTTP requests.

use std::time::Duration;

/// Retry policy for a single request.
///
/// GET endpoints default to [`RetryPolicy::Idempotent`]; order and session
/// mutations are [`RetryPolicy::None`] — a replayed POST could double an
/// order.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Never retry.
    #[default]
    None,
    /// Retry transport failures and 502/503/504, with backoff on 429.
    Idempotent,
    /// Caller-supplied behavior.
    Custom(RetryConfig),
}

/// Backoff configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries on top of the initial attempt.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Randomize each delay by ±25% to avoid synchronized retries.
    pub jitter: bool,
    /// Status codes worth retrying.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(8),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Config used for idempotent (GET) requests.
    pub fn idempotent() -> Self {
        Self {
            retryable_statuses: vec![429, 502, 503, 504],
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp = self.backoff_factor.powi(attempt as i32);
        let base = self.initial_delay.as_millis() as f64 * exp;
        let capped = base.min(self.max_delay.as_millis() as f64);

        let ms = if self.jitter {
            let spread = capped * 0.25;
            let offset = (rand::random::<f64>() * 2.0 - 1.0) * spread;
            (capped + offset).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(ms as u64)
    }
}
