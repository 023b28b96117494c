//! Constants for the generator client (endpoint, options, timeouts).

/// Default generator service endpoint.
pub const DEFAULT_GENERATOR_URI: &str = "https://pdf.philipp-marien.de/generate";

/// Query option sent with every request unless the caller replaces the options.
pub const DEFAULT_ENCODING_OPTION: (&str, &str) = ("encoding", "utf-8");

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default overall request timeout, connect through body (2 minutes).
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Environment variable the CLI reads the API key from.
pub const API_KEY_ENV: &str = "HTML_TO_PDF_API_KEY";
