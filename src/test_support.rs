//! Shared helpers for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, Request, Response, StatusCode};

use crate::generator::{Body, ReasonPhrase, Transport, TransportError};

/// A request captured by [`StubTransport`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) method: Method,
    pub(crate) uri: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Respond {
        status: u16,
        body: Bytes,
        headers: Vec<(&'static str, &'static str)>,
        reason: Option<&'static str>,
        stream_error: Option<&'static str>,
    },
    Fail(&'static str),
}

/// Transport that returns a canned reply and records every request.
///
/// Clones share the request log.
#[derive(Debug, Clone)]
pub(crate) struct StubTransport {
    reply: Reply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubTransport {
    pub(crate) fn respond(status: u16, body: &'static str) -> Self {
        Self {
            reply: Reply::Respond {
                status,
                body: Bytes::from_static(body.as_bytes()),
                headers: Vec::new(),
                reason: None,
                stream_error: None,
            },
            requests: Arc::default(),
        }
    }

    pub(crate) fn fail(message: &'static str) -> Self {
        Self {
            reply: Reply::Fail(message),
            requests: Arc::default(),
        }
    }

    pub(crate) fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        if let Reply::Respond { headers, .. } = &mut self.reply {
            headers.push((name, value));
        }
        self
    }

    pub(crate) fn with_reason(mut self, phrase: &'static str) -> Self {
        if let Reply::Respond { reason, .. } = &mut self.reply {
            *reason = Some(phrase);
        }
        self
    }

    /// Makes the body stream fail with `message` after the canned bytes.
    pub(crate) fn with_stream_error(mut self, message: &'static str) -> Self {
        if let Reply::Respond { stream_error, .. } = &mut self.reply {
            *stream_error = Some(message);
        }
        self
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Body>, TransportError> {
        let (parts, body) = request.into_parts();
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(RecordedRequest {
                method: parts.method,
                uri: parts.uri.to_string(),
                headers: parts.headers,
                body,
            });

        match &self.reply {
            Reply::Fail(message) => Err(TransportError::other(*message)),
            Reply::Respond {
                status,
                body,
                headers,
                reason,
                stream_error,
            } => {
                let body = match stream_error {
                    Some(message) => Body::from_stream(futures_util::stream::iter(vec![
                        Ok(body.clone()),
                        Err(TransportError::other(*message)),
                    ])),
                    None => Body::from_bytes(body.clone()),
                };
                let mut response = Response::new(body);
                *response.status_mut() =
                    StatusCode::from_u16(*status).map_err(|e| TransportError::other(e.to_string()))?;
                for (name, value) in headers {
                    let name = HeaderName::from_bytes(name.as_bytes())
                        .map_err(|e| TransportError::other(e.to_string()))?;
                    response
                        .headers_mut()
                        .insert(name, HeaderValue::from_static(*value));
                }
                if let Some(phrase) = reason {
                    response
                        .extensions_mut()
                        .insert(ReasonPhrase((*phrase).to_string()));
                }
                Ok(response)
            }
        }
    }
}
