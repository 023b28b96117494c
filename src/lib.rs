//! HTML to PDF conversion through a remote generator service.
//!
//! The library minifies an HTML document, posts it to the generator service
//! and hands the rendered PDF back as an HTTP response or a file on disk.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`minify`] - Textual HTML minification applied before sending
//! - [`filename`] - Filename sanitization for generated documents
//! - [`disposition`] - `Content-Disposition` header rendering
//! - [`generator`] - Request construction, transport seam and response classification
//! - [`response`] - Outward responses and file output

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod disposition;
pub mod filename;
pub mod generator;
pub mod minify;
pub mod response;
mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use disposition::DispositionMode;
pub use filename::sanitize_filename;
pub use generator::{
    Body, ConfigError, GenerateError, GeneratorClient, GeneratorConfig, ReasonPhrase,
    ReqwestTransport, Transport, TransportError, parse_retry_after,
};
pub use minify::minify_html;
pub use response::PdfResponder;
