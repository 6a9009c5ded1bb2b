//! Backoff policy for rate-limited requests.

use factreel_error::{ConfigError, FactreelResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wait applied when a rate-limit response carries no `Retry-After` hint.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Default cap on requests sent while rate limited.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// How to wait out rate limiting.
///
/// The provider's `Retry-After` hint always wins; `default_retry_after_secs`
/// fills in when the hint is missing. `max_attempts` bounds the total number
/// of requests (first attempt included); `None` retries until the provider
/// stops answering 429.
///
/// # Example
///
/// ```toml
/// [backoff]
/// default_retry_after_secs = 60
/// max_attempts = 10
/// ```
///
/// ```
/// use factreel_rate_limit::BackoffPolicy;
/// use std::time::Duration;
///
/// let policy = BackoffPolicy::default();
/// assert_eq!(policy.delay_for(None), Duration::from_secs(60));
/// assert_eq!(policy.delay_for(Some(Duration::from_secs(5))), Duration::from_secs(5));
/// assert!(policy.allows_attempt(10));
/// assert!(!policy.allows_attempt(11));
///
/// assert!(BackoffPolicy::unbounded().allows_attempt(u32::MAX));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackoffPolicy {
    /// Seconds to wait when the provider gives no hint
    #[serde(default = "default_retry_after_secs")]
    pub default_retry_after_secs: u64,

    /// Maximum number of requests, or `None` for no limit
    #[serde(default = "default_max_attempts")]
    pub max_attempts: Option<u32>,
}

fn default_retry_after_secs() -> u64 {
    DEFAULT_RETRY_AFTER_SECS
}

fn default_max_attempts() -> Option<u32> {
    Some(DEFAULT_MAX_ATTEMPTS)
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            default_retry_after_secs: DEFAULT_RETRY_AFTER_SECS,
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        }
    }
}

impl BackoffPolicy {
    /// Keep retrying for as long as the provider rate limits.
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            ..Self::default()
        }
    }

    /// Cap the total number of requests.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Set the wait used when no hint is given.
    pub fn with_default_retry_after(mut self, secs: u64) -> Self {
        self.default_retry_after_secs = secs;
        self
    }

    /// Delay before the next attempt, honouring the provider hint.
    pub fn delay_for(&self, hint: Option<Duration>) -> Duration {
        hint.unwrap_or(Duration::from_secs(self.default_retry_after_secs))
    }

    /// Whether request number `attempt` (1-based) may be sent.
    pub fn allows_attempt(&self, attempt: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempt <= max)
    }

    /// Validates that the policy can send at least one request.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_attempts` is zero.
    pub fn validate(&self) -> FactreelResult<()> {
        if self.max_attempts == Some(0) {
            return Err(ConfigError::new("backoff.max_attempts must be at least 1").into());
        }
        Ok(())
    }
}
