//! Retry policy for transport failures.
//!
//! One budget of attempts covers a resource's whole lifecycle, from
//! submission through its last report query. Only transport faults
//! consume attempts; a still-queued analysis never does, and a
//! rate-limit reply is never retried at all. Retrying is an explicit
//! bounded loop at the call sites; exhaustion skips the resource,
//! it does not abort the run.

use std::time::Duration;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts per resource.
    pub max_attempts: u32,

    /// Fixed delay before each retry.
    pub backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// Creates a new retry configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the fixed back-off delay.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

/// The remaining-attempts counter for one resource's lifecycle.
///
/// Created when processing of a resource begins and discarded when it
/// ends; never shared between resources.
#[derive(Debug)]
pub struct RetryState {
    remaining: u32,
}

impl RetryState {
    /// Creates a fresh budget from the configuration.
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            remaining: config.max_attempts,
        }
    }

    /// Consumes one attempt. Returns `false` when the budget is already
    /// exhausted, in which case the resource must be skipped.
    pub fn try_consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    /// Attempts left in the budget.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.backoff, Duration::from_secs(60));
    }

    #[test]
    fn test_budget_consumption() {
        let config = RetryConfig::new().with_max_attempts(2);
        let mut state = RetryState::new(&config);

        assert!(state.try_consume());
        assert!(state.try_consume());
        assert!(!state.try_consume());
        assert!(!state.try_consume());
        assert_eq!(state.remaining(), 0);
    }

    #[test]
    fn test_zero_attempts_never_retries() {
        let config = RetryConfig::new().with_max_attempts(0);
        let mut state = RetryState::new(&config);
        assert!(!state.try_consume());
    }
}
