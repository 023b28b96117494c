//! Remote PDF generator client.
//!
//! This module sends HTML to the generator service and interprets its
//! answer.
//!
//! # Features
//!
//! - HTML minification before sending (can be disabled per config)
//! - Query options and Bearer authentication from [`GeneratorConfig`]
//! - Pluggable [`Transport`]; [`ReqwestTransport`] is the default
//! - Typed failures for rate limiting and generator errors
//!
//! # Example
//!
//! ```no_run
//! use html_to_pdf::generator::{GeneratorClient, GeneratorConfig, GenerateError};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeneratorClient::with_reqwest(GeneratorConfig::default())?;
//! match client.generate("<h1>Invoice</h1>").await {
//!     Ok(body) => println!("{} bytes", body.bytes().await?.len()),
//!     Err(GenerateError::RateLimited { retry_after }) => println!("retry after {retry_after:?}"),
//!     Err(other) => return Err(other.into()),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
pub mod constants;
mod error;
mod reqwest_transport;
mod retry_after;
mod transport;

pub use client::GeneratorClient;
pub use config::{ConfigError, GeneratorConfig};
pub use error::GenerateError;
pub use reqwest_transport::ReqwestTransport;
pub use retry_after::parse_retry_after;
pub use transport::{Body, ReasonPhrase, Transport, TransportError};
