//! Generator configuration: endpoint, query options and credentials.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::constants::{DEFAULT_ENCODING_OPTION, DEFAULT_GENERATOR_URI};

/// Errors that can occur while loading a [`GeneratorConfig`] from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// The config file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// The config file path.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration held by a [`GeneratorClient`](super::GeneratorClient).
///
/// The endpoint and options can be changed after construction; the API key
/// is fixed. Missing fields in a config file take their defaults:
///
/// ```json
/// {
///   "endpoint": "https://pdf.example.com/generate",
///   "options": { "encoding": "utf-8", "format": "A4" },
///   "api_key": "secret",
///   "minify": true
/// }
/// ```
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    endpoint: Url,
    options: IndexMap<String, String>,
    api_key: Option<String>,
    minify: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

impl GeneratorConfig {
    /// Creates a config with the default endpoint and options.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(api_key: Option<String>) -> Self {
        let endpoint =
            Url::parse(DEFAULT_GENERATOR_URI).expect("default generator URI is valid"); // Static value, safe to panic
        let (key, value) = DEFAULT_ENCODING_OPTION;
        Self {
            endpoint,
            options: IndexMap::from([(key.to_string(), value.to_string())]),
            api_key,
            minify: true,
        }
    }

    /// Loads a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the endpoint, builder style.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Replaces the API key, builder style.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Enables or disables minification, builder style.
    #[must_use]
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// The generator endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Replaces the generator endpoint.
    pub fn set_endpoint(&mut self, endpoint: Url) {
        self.endpoint = endpoint;
    }

    /// Query options sent with every request, in insertion order.
    #[must_use]
    pub fn options(&self) -> &IndexMap<String, String> {
        &self.options
    }

    /// Replaces all query options, including the default encoding.
    pub fn set_options(&mut self, options: IndexMap<String, String>) {
        self.options = options;
    }

    /// Adds or overwrites a single query option.
    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    /// The API key, if one is configured and non-empty.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Whether HTML is minified before sending.
    #[must_use]
    pub fn minify(&self) -> bool {
        self.minify
    }

    /// Endpoint with the options appended as a form-urlencoded query string.
    #[must_use]
    pub fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        if !self.options.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.options);
        }
        url
    }
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("options", &self.options)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("minify", &self.minify)
            .finish()
    }
}
