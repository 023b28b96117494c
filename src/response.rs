//! Packaging generated PDFs as HTTP responses or local files.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use http::Response;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use crate::disposition::DispositionMode;
use crate::filename::sanitize_filename;
use crate::generator::{Body, GenerateError, GeneratorClient, Transport};

/// Content type of generated documents.
const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Turns HTML into ready-to-serve PDF responses or files on disk.
///
/// # Example
///
/// ```no_run
/// use html_to_pdf::{GeneratorClient, GeneratorConfig, PdfResponder};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeneratorClient::with_reqwest(GeneratorConfig::default())?;
/// let responder = PdfResponder::new(client);
///
/// let response = responder.attachment_response("invoice 42", "<h1>Invoice</h1>").await?;
/// assert_eq!(response.headers()["content-disposition"], r#"attachment; filename="invoice_42.pdf""#);
///
/// let path = responder.write_file("invoice 42", "<h1>Invoice</h1>").await?;
/// println!("written to {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PdfResponder<T> {
    client: GeneratorClient<T>,
}

impl<T: Transport> PdfResponder<T> {
    /// Wraps a generator client.
    pub fn new(client: GeneratorClient<T>) -> Self {
        Self { client }
    }

    /// The wrapped generator client.
    #[must_use]
    pub fn client(&self) -> &GeneratorClient<T> {
        &self.client
    }

    /// Mutable access to the wrapped client, e.g. to change the endpoint.
    pub fn client_mut(&mut self) -> &mut GeneratorClient<T> {
        &mut self.client
    }

    /// Generates a PDF and wraps it in a response displayed inline.
    ///
    /// # Errors
    ///
    /// See [`build_response`](Self::build_response).
    pub async fn inline_response(
        &self,
        filename: &str,
        html: &str,
    ) -> Result<Response<Body>, GenerateError> {
        self.build_response(filename, html, DispositionMode::Inline)
            .await
    }

    /// Generates a PDF and wraps it in a response offered as a download.
    ///
    /// # Errors
    ///
    /// See [`build_response`](Self::build_response).
    pub async fn attachment_response(
        &self,
        filename: &str,
        html: &str,
    ) -> Result<Response<Body>, GenerateError> {
        self.build_response(filename, html, DispositionMode::Attachment)
            .await
    }

    /// Generates a PDF and wraps it in a new response.
    ///
    /// The response carries `Content-Disposition` (with the sanitized
    /// filename) and `Content-Type: application/pdf`. No headers from the
    /// generator response are copied.
    ///
    /// # Errors
    ///
    /// Returns any [`GenerateError`] from
    /// [`GeneratorClient::generate`].
    #[instrument(skip(self, html, mode), fields(mode = %mode))]
    pub async fn build_response(
        &self,
        filename: &str,
        html: &str,
        mode: DispositionMode,
    ) -> Result<Response<Body>, GenerateError> {
        let body = self.client.generate(html).await?;
        let filename = sanitize_filename(filename);
        let disposition = mode.header_value(Some(&filename));
        debug!(%disposition, "building PDF response");

        Response::builder()
            .header(CONTENT_DISPOSITION, disposition)
            .header(CONTENT_TYPE, PDF_CONTENT_TYPE)
            .body(body)
            .map_err(|e| GenerateError::invalid_request(self.client.endpoint().as_str(), e))
    }

    /// Generates a PDF and writes it to the sanitized filename in the
    /// working directory, replacing any existing file.
    ///
    /// # Errors
    ///
    /// See [`write_file_in`](Self::write_file_in).
    pub async fn write_file(&self, filename: &str, html: &str) -> Result<PathBuf, GenerateError> {
        self.write_file_in(Path::new(""), filename, html).await
    }

    /// Generates a PDF and writes it to `dir/<sanitized filename>`, replacing
    /// any existing file. Returns the written path.
    ///
    /// The body is streamed into `<name>.part` next to the target and renamed
    /// over it once complete. Nothing is created when generation fails, and an
    /// existing file is left untouched if the body stream breaks.
    ///
    /// # Errors
    ///
    /// Returns any [`GenerateError`] from generation,
    /// [`GenerateError::Body`] if the body stream fails, or
    /// [`GenerateError::Io`] if the file cannot be written.
    #[instrument(skip(self, dir, html), fields(dir = %dir.display()))]
    pub async fn write_file_in(
        &self,
        dir: &Path,
        filename: &str,
        html: &str,
    ) -> Result<PathBuf, GenerateError> {
        let body = self.client.generate(html).await?;
        let path = dir.join(sanitize_filename(filename));
        let part_path = part_path_for(&path);

        let file = File::create(&part_path)
            .await
            .map_err(|e| GenerateError::io(path.clone(), e))?;

        let result = match stream_to_file(file, body, &part_path).await {
            Ok(bytes_written) => tokio::fs::rename(&part_path, &path)
                .await
                .map(|()| bytes_written)
                .map_err(|e| GenerateError::io(path.clone(), e)),
            Err(e) => Err(e),
        };
        if result.is_err() {
            debug!(path = %part_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&part_path).await;
        }
        let bytes_written = result?;

        info!(path = %path.display(), bytes = bytes_written, "PDF written");
        Ok(path)
    }
}

/// Sibling path the document is streamed into before it replaces `path`.
fn part_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

/// Streams the body into `file`, returning bytes written.
async fn stream_to_file(file: File, body: Body, path: &Path) -> Result<u64, GenerateError> {
    let mut writer = BufWriter::new(file);
    let mut chunks = body.into_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(GenerateError::body)?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| GenerateError::io(path.to_path_buf(), e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| GenerateError::io(path.to_path_buf(), e))?;

    Ok(bytes_written)
}
