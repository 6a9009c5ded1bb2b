//! Extraction of `Retry-After` hints from response headers.
//!
//! The header carries either a number of seconds (`Retry-After: 120`) or an
//! HTTP date (`Retry-After: Wed, 21 Oct 2015 07:28:00 GMT`). Dates in the past
//! mean "retry now".

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Header name for the provider's retry hint.
pub const RETRY_AFTER: &str = "retry-after";

/// Read the retry hint from response headers.
///
/// Returns `None` when the header is absent or unparseable, leaving the
/// caller to apply its default.
#[instrument(skip(headers))]
pub fn retry_after_from_headers(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    let parsed = parse_retry_after(value, Utc::now());
    debug!(value, parsed_secs = ?parsed.map(|d| d.as_secs()), "Parsed Retry-After header");
    parsed
}

/// Parse a `Retry-After` value relative to `now`.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use factreel_rate_limit::parse_retry_after;
/// use std::time::Duration;
///
/// assert_eq!(parse_retry_after("5", Utc::now()), Some(Duration::from_secs(5)));
/// assert_eq!(parse_retry_after("soon", Utc::now()), None);
/// ```
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    let wait = (at - now).to_std().unwrap_or(Duration::ZERO);
    Some(wait)
}
