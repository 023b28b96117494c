//! Error types for PDF generation.
//!
//! [`GenerateError::RateLimited`] and [`GenerateError::Generator`] are the two
//! outcomes the generator service itself can produce. The remaining variants
//! describe failures on our side of the wire.

use std::path::PathBuf;
use std::time::SystemTime;

use thiserror::Error;

use super::transport::TransportError;

/// Errors that can occur while generating, returning, or saving a PDF.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The generator answered `429 Too Many Requests`.
    #[error("too many requests: rate limit reached{}", retry_after_suffix(.retry_after))]
    RateLimited {
        /// When the service accepts requests again, if it said so.
        retry_after: Option<SystemTime>,
    },

    /// The generator answered with a status other than 200, 201 or 429.
    #[error("the generator responded with HTTP status {status} ({reason})")]
    Generator {
        /// The HTTP status code.
        status: u16,
        /// The reason phrase of the response.
        reason: String,
    },

    /// The request never produced a response.
    #[error("failed to reach generator at {endpoint}: {source}")]
    Transport {
        /// The endpoint the request was sent to.
        endpoint: String,
        /// The underlying transport error.
        #[source]
        source: TransportError,
    },

    /// The outbound request or outward response could not be assembled.
    #[error("invalid HTTP message for {endpoint}: {source}")]
    InvalidRequest {
        /// The endpoint involved.
        endpoint: String,
        /// The underlying `http` builder error.
        #[source]
        source: http::Error,
    },

    /// The API key contains characters that are not allowed in a header.
    #[error("API key is not a valid Authorization header value")]
    InvalidApiKey,

    /// Reading the generated document failed midway.
    #[error("failed to read generated document: {source}")]
    Body {
        /// The underlying transport error.
        #[source]
        source: TransportError,
    },

    /// Writing the generated document to disk failed.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

fn retry_after_suffix(retry_after: &Option<SystemTime>) -> String {
    retry_after.map_or_else(String::new, |at| {
        format!("; retry after {}", httpdate::fmt_http_date(at))
    })
}

impl GenerateError {
    /// Creates a rate-limit error.
    #[must_use]
    pub fn rate_limited(retry_after: Option<SystemTime>) -> Self {
        Self::RateLimited { retry_after }
    }

    /// Creates a generator status error.
    pub fn generator(status: u16, reason: impl Into<String>) -> Self {
        Self::Generator {
            status,
            reason: reason.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(endpoint: impl Into<String>, source: TransportError) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(endpoint: impl Into<String>, source: http::Error) -> Self {
        Self::InvalidRequest {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates a body read error.
    #[must_use]
    pub fn body(source: TransportError) -> Self {
        Self::Body { source }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for [`GenerateError::RateLimited`].
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// The retry-after instant of a rate-limit error.
    #[must_use]
    pub fn retry_after(&self) -> Option<SystemTime> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// The HTTP status the generator answered with, for service-side failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::Generator { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_rate_limited_display_without_retry_after() {
        let error = GenerateError::rate_limited(None);
        assert_eq!(error.to_string(), "too many requests: rate limit reached");
    }

    #[test]
    fn test_rate_limited_display_with_retry_after() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_445_412_480);
        let msg = GenerateError::rate_limited(Some(at)).to_string();
        assert_eq!(
            msg,
            "too many requests: rate limit reached; retry after Wed, 21 Oct 2015 07:28:00 GMT"
        );
    }

    #[test]
    fn test_generator_display() {
        let msg = GenerateError::generator(500, "Internal Error").to_string();
        assert_eq!(
            msg,
            "the generator responded with HTTP status 500 (Internal Error)"
        );
    }

    #[test]
    fn test_transport_display_includes_endpoint() {
        let error = GenerateError::transport("https://pdf.example/generate", TransportError::Timeout);
        let msg = error.to_string();
        assert!(msg.contains("https://pdf.example/generate"), "got: {msg}");
        assert!(msg.contains("timed out"), "got: {msg}");
    }

    #[test]
    fn test_io_display_includes_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let msg = GenerateError::io("/tmp/out.pdf", io_error).to_string();
        assert!(msg.contains("/tmp/out.pdf"), "got: {msg}");
    }

    #[test]
    fn test_accessors() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(60);
        let limited = GenerateError::rate_limited(Some(at));
        assert!(limited.is_rate_limited());
        assert_eq!(limited.retry_after(), Some(at));
        assert_eq!(limited.status(), Some(429));

        let failed = GenerateError::generator(502, "Bad Gateway");
        assert!(!failed.is_rate_limited());
        assert_eq!(failed.retry_after(), None);
        assert_eq!(failed.status(), Some(502));

        assert_eq!(GenerateError::InvalidApiKey.status(), None);
    }
}
