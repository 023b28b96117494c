//! Client for the remote PDF generator service.
//!
//! [`GeneratorClient`] minifies the HTML, builds the POST request, hands it to
//! a [`Transport`] and classifies the response.

use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue, RETRY_AFTER};
use http::{Method, Request, Response};
use indexmap::IndexMap;
use tracing::{debug, instrument, warn};
use url::Url;

use super::config::GeneratorConfig;
use super::error::GenerateError;
use super::reqwest_transport::ReqwestTransport;
use super::retry_after::parse_retry_after;
use super::transport::{Body, ReasonPhrase, Transport, TransportError};
use crate::minify::minify_html;

/// Content type of the outbound HTML document.
const HTML_CONTENT_TYPE: &str = "text/html";

/// Sends HTML documents to the generator service and returns the rendered PDF.
///
/// Each [`generate`](Self::generate) call makes exactly one request; nothing
/// is retried or cached. Changing the configuration needs `&mut self`, so it
/// cannot race with an in-flight call on the same instance.
///
/// # Example
///
/// ```no_run
/// use html_to_pdf::{GeneratorClient, GeneratorConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeneratorClient::with_reqwest(GeneratorConfig::new(Some("key".into())))?;
/// let pdf = client.generate("<h1>Hello</h1>").await?.bytes().await?;
/// println!("{} bytes", pdf.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorClient<T> {
    transport: T,
    config: GeneratorConfig,
}

impl GeneratorClient<ReqwestTransport> {
    /// Creates a client backed by a default [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the HTTP client cannot be built.
    pub fn with_reqwest(config: GeneratorConfig) -> Result<Self, TransportError> {
        Ok(Self::new(ReqwestTransport::new()?, config))
    }
}

impl<T: Transport> GeneratorClient<T> {
    /// Creates a client over the given transport.
    pub fn new(transport: T, config: GeneratorConfig) -> Self {
        Self { transport, config }
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut GeneratorConfig {
        &mut self.config
    }

    /// The generator endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        self.config.endpoint()
    }

    /// Replaces the generator endpoint.
    pub fn set_endpoint(&mut self, endpoint: Url) {
        self.config.set_endpoint(endpoint);
    }

    /// Query options sent with every request.
    #[must_use]
    pub fn options(&self) -> &IndexMap<String, String> {
        self.config.options()
    }

    /// Replaces the query options.
    pub fn set_options(&mut self, options: IndexMap<String, String>) {
        self.config.set_options(options);
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the outbound generator request without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidApiKey`] if the key cannot be sent as a
    /// header, or [`GenerateError::InvalidRequest`] if the URL is rejected by
    /// the `http` crate.
    pub fn build_request(&self, html: &str) -> Result<Request<Bytes>, GenerateError> {
        let url = self.config.request_url();
        let body = if self.config.minify() {
            minify_html(html)
        } else {
            html.to_string()
        };
        debug!(
            original_len = html.len(),
            body_len = body.len(),
            "prepared generator request body"
        );

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(url.as_str())
            .header(CONTENT_TYPE, HTML_CONTENT_TYPE);

        if let Some(api_key) = self.config.api_key() {
            let mut value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|_| GenerateError::InvalidApiKey)?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
        }

        builder
            .body(Bytes::from(body))
            .map_err(|e| GenerateError::invalid_request(self.endpoint().as_str(), e))
    }

    /// Renders `html` into a PDF.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::RateLimited`] when the service answers 429
    /// - [`GenerateError::Generator`] for any status other than 200, 201 or 429
    /// - [`GenerateError::Transport`] when no response was received
    /// - the errors of [`build_request`](Self::build_request)
    #[instrument(skip(self, html), fields(endpoint = %self.config.endpoint()))]
    pub async fn generate(&self, html: &str) -> Result<Body, GenerateError> {
        let request = self.build_request(html)?;
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| GenerateError::transport(self.endpoint().as_str(), e))?;
        classify_response(response)
    }
}

/// Maps a generator response to the document body or a typed failure.
fn classify_response(response: Response<Body>) -> Result<Body, GenerateError> {
    let status = response.status();
    debug!(status = status.as_u16(), "classifying generator response");

    match status.as_u16() {
        200 | 201 => Ok(response.into_body()),
        429 => {
            let raw = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok());
            let retry_after = raw.and_then(parse_retry_after);
            if raw.is_some() && retry_after.is_none() {
                warn!(value = ?raw, "ignoring unparsable Retry-After header");
            }
            warn!(
                retry_after = ?retry_after.map(httpdate::fmt_http_date),
                "generator rate limit reached"
            );
            Err(GenerateError::rate_limited(retry_after))
        }
        _ => {
            let reason = response.extensions().get::<ReasonPhrase>().map_or_else(
                || status.canonical_reason().unwrap_or_default().to_string(),
                |phrase| phrase.0.clone(),
            );
            Err(GenerateError::generator(status.as_u16(), reason))
        }
    }
}
