//! `Retry-After` header parsing for rate-limited responses.

use std::time::{Duration, SystemTime};

use tracing::{debug, instrument};

/// Parses a `Retry-After` header value into the instant it points at.
///
/// Supports both RFC 7231 formats:
/// - HTTP-date: `Wed, 21 Oct 2015 07:28:00 GMT`
/// - Integer seconds: `120`, taken relative to the current time
///
/// Returns `None` when the value cannot be parsed.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, SystemTime};
/// use html_to_pdf::parse_retry_after;
///
/// let at = parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT");
/// assert_eq!(at, Some(SystemTime::UNIX_EPOCH + Duration::from_secs(1_445_412_480)));
///
/// assert_eq!(parse_retry_after("invalid"), None);
/// ```
#[must_use]
#[instrument(level = "debug")]
pub fn parse_retry_after(header_value: &str) -> Option<SystemTime> {
    let header_value = header_value.trim();

    if let Ok(datetime) = httpdate::parse_http_date(header_value) {
        return Some(datetime);
    }

    if let Ok(seconds) = header_value.parse::<u64>() {
        return SystemTime::now().checked_add(Duration::from_secs(seconds));
    }

    debug!("unparsable Retry-After value");
    None
}
