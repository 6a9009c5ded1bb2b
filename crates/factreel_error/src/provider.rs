//! Provider error types.
//!
//! Every failure reported by an external service is classified into a
//! [`ProviderErrorKind`] at the adapter boundary, so pipeline stages match on
//! variants instead of inspecting error codes or message text.

use std::time::Duration;

/// Provider failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Non-success HTTP status from a provider endpoint
    #[display("HTTP {} error: {}", status, body)]
    Network {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },
    /// Image synthesis refused the prompt for policy reasons
    #[display("Content policy violation: {}", message)]
    ContentPolicyViolation {
        /// Provider message
        message: String,
        /// Safe replacement prompt suggested by the provider, if any
        revised_prompt: Option<String>,
    },
    /// Provider quota exceeded
    #[display("Rate limited (retry after {:?} seconds)", retry_after_secs)]
    RateLimited {
        /// Provider-suggested wait in seconds
        retry_after_secs: Option<u64>,
    },
    /// Structured response did not match the expected shape
    #[display("Schema validation failed: {}", _0)]
    SchemaValidation(String),
    /// Any other provider-side failure
    #[display("Unhandled provider error: {}", _0)]
    Unhandled(String),
}

impl ProviderErrorKind {
    /// Revised prompt carried by a content-policy rejection.
    pub fn revised_prompt(&self) -> Option<&str> {
        match self {
            ProviderErrorKind::ContentPolicyViolation { revised_prompt, .. } => {
                revised_prompt.as_deref()
            }
            _ => None,
        }
    }

    /// Check if this error is a rate-limit signal.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProviderErrorKind::RateLimited { .. })
    }

    /// Provider-suggested delay before retrying, if this is a rate limit with a hint.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ProviderErrorKind::RateLimited {
                retry_after_secs: Some(secs),
            } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use factreel_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::ContentPolicyViolation {
///     message: "Your request was rejected".to_string(),
///     revised_prompt: Some("A calm octopus in a reef".to_string()),
/// });
/// assert_eq!(err.kind.revised_prompt(), Some("A calm octopus in a reef"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error ({}): {} at line {} in {}", provider, kind, line, file)]
pub struct ProviderError {
    /// Name of the provider that failed (e.g. "openai", "azure-images")
    pub provider: &'static str,
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        Self::with_provider("unknown", kind)
    }

    /// Create a new ProviderError attributed to a named provider.
    #[track_caller]
    pub fn with_provider(provider: &'static str, kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            provider,
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
