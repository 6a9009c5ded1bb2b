//! Rate-limit handling for provider calls.
//!
//! Providers signal quota exhaustion with HTTP 429 and an optional
//! `Retry-After` header. This crate extracts that hint from response headers
//! and defines the [`BackoffPolicy`] that decides how long to wait and how many
//! times to try again.

mod detector;
mod policy;

pub use detector::{RETRY_AFTER, parse_retry_after, retry_after_from_headers};
pub use policy::{BackoffPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_AFTER_SECS};
