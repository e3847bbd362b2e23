//! Retry policy for outgoing engine requests

use super::FetchError;
use crate::config::OutgoingSettings;
use std::time::Duration;

/// Bounded retry with exponential backoff
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Wait before the first retry; doubled for each following retry
    pub backoff_base: Duration,
    /// Status codes considered transient
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
            retry_statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    pub fn from_settings(settings: &OutgoingSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            backoff_base: Duration::try_from_secs_f64(settings.backoff_base)
                .unwrap_or(Duration::ZERO),
            retry_statuses: settings.retry_statuses.clone(),
        }
    }

    /// Whether a response with this status should be attempted again
    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Whether a failed attempt is worth repeating
    pub fn is_retryable(&self, error: &FetchError) -> bool {
        match error {
            FetchError::Status(status) => self.should_retry_status(*status),
            FetchError::Timeout(_) | FetchError::Connection(_) | FetchError::Body(_) => true,
            FetchError::InvalidRequest(_) => false,
        }
    }

    /// Wait after the given (1-based) failed attempt
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff_base.saturating_mul(1u32 << exponent)
    }

    /// Whether another attempt is allowed after `attempt` attempts
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff_base, Duration::from_secs(1));
    }

    #[test]
    fn test_retry_statuses() {
        let policy = RetryPolicy::default();
        for status in [429, 500, 502, 503, 504] {
            assert!(policy.should_retry_status(status), "{status} should retry");
        }
        for status in [400, 401, 403, 404, 501] {
            assert!(!policy.should_retry_status(status), "{status} should not retry");
        }
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(2));
        assert_eq!(policy.backoff_for(3), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_does_not_overflow() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(1000), policy.backoff_for(17));
    }

    #[test]
    fn test_attempt_budget() {
        let policy = RetryPolicy::default();
        assert!(policy.has_attempts_left(1));
        assert!(policy.has_attempts_left(2));
        assert!(!policy.has_attempts_left(3));
    }

    #[test]
    fn test_error_classification() {
        let policy = RetryPolicy::default();
        assert!(policy.is_retryable(&FetchError::Status(503)));
        assert!(!policy.is_retryable(&FetchError::Status(403)));
        assert!(policy.is_retryable(&FetchError::Timeout(Duration::from_secs(10))));
        assert!(policy.is_retryable(&FetchError::Connection("refused".into())));
        assert!(!policy.is_retryable(&FetchError::InvalidRequest("bad url".into())));
    }

    #[test]
    fn test_from_settings() {
        let settings = OutgoingSettings {
            max_attempts: 0,
            backoff_base: 0.25,
            retry_statuses: vec![503],
            ..Default::default()
        };
        let policy = RetryPolicy::from_settings(&settings);
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.backoff_base, Duration::from_millis(250));
        assert!(!policy.should_retry_status(429));
    }
}
