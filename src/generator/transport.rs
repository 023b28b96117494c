//! The HTTP seam between [`GeneratorClient`](super::GeneratorClient) and the network.
//!
//! The client builds a plain [`http::Request`] and hands it to a [`Transport`].
//! Anything that can execute such a request (reqwest, hyper, a test stub)
//! can back the client.

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::stream::{self, Stream, StreamExt};
use http::{Request, Response};
use thiserror::Error;

/// Executes a single HTTP request.
///
/// Implementations own timeout and cancellation policy. The client never
/// retries, so one call to [`send`](Transport::send) is one network exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response with a streaming body.
    ///
    /// Non-success statuses are returned as `Ok`; classification happens in
    /// the client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained.
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Body>, TransportError>;
}

/// Errors raised by a [`Transport`] or while reading a [`Body`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// Network-level failure (DNS, connection refused, TLS, broken stream).
    #[error("network error: {source}")]
    Network {
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// Failure reported by a custom transport.
    #[error("transport failure: {message}")]
    Other {
        /// Human readable description.
        message: String,
    },
}

impl TransportError {
    /// Maps a reqwest error, promoting timeouts to [`TransportError::Timeout`].
    #[must_use]
    pub fn from_reqwest(source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout
        } else {
            Self::Network { source }
        }
    }

    /// Creates a transport error from a free-form message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

/// Reason phrase received on the status line.
///
/// `http::Response` has no slot for it, so transports that can see the raw
/// phrase insert this into the response extensions. Without it the client
/// falls back to the canonical phrase for the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonPhrase(pub String);

type ChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Response body of the generator: the PDF document on success.
///
/// Ownership passes to the caller. It can be drained with [`Body::bytes`] or
/// consumed chunk by chunk with [`Body::into_stream`].
pub struct Body {
    chunks: ChunkStream,
}

impl Body {
    /// Wraps an in-memory payload.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            chunks: Box::pin(stream::once(async move { Ok(bytes) })),
        }
    }

    /// Wraps a chunk stream.
    pub fn from_stream<S>(chunks: S) -> Self
    where
        S: Stream<Item = Result<Bytes, TransportError>> + Send + 'static,
    {
        Self {
            chunks: Box::pin(chunks),
        }
    }

    /// An empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_stream(stream::empty())
    }

    /// Returns the underlying chunk stream.
    #[must_use]
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, TransportError>> + Send {
        self.chunks
    }

    /// Reads the whole body into memory.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by the chunk stream.
    pub async fn bytes(self) -> Result<Bytes, TransportError> {
        let mut chunks = self.chunks;
        let mut buffer = BytesMut::new();
        while let Some(chunk) = chunks.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body").finish_non_exhaustive()
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::from_bytes(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_body_bytes_concatenates_chunks() {
        let body = Body::from_stream(stream::iter(vec![
            Ok(Bytes::from_static(b"PDF")),
            Ok(Bytes::from_static(b"BYTES")),
        ]));
        assert_eq!(body.bytes().await.unwrap(), Bytes::from_static(b"PDFBYTES"));
    }

    #[tokio::test]
    async fn test_body_bytes_surfaces_stream_error() {
        let body = Body::from_stream(stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(TransportError::other("connection reset")),
        ]));
        let result = body.bytes().await;
        assert!(matches!(result, Err(TransportError::Other { .. })));
    }

    #[test]
    fn test_empty_body_reads_nothing() {
        let bytes = tokio_test::block_on(Body::empty().bytes()).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_transport_error_display() {
        assert_eq!(TransportError::Timeout.to_string(), "request timed out");
        let err = TransportError::other("boom");
        assert!(err.to_string().contains("boom"), "got: {err}");
    }
}
