//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;
use url::Url;

use html_to_pdf::generator::constants::{API_KEY_ENV, CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use html_to_pdf::{ConfigError, GeneratorConfig};

/// Convert an HTML document to PDF using a remote generator service.
///
/// Reads HTML from INPUT (or stdin) and writes the rendered PDF to the
/// sanitized --output name.
#[derive(Parser, Debug)]
#[command(name = "html-to-pdf")]
#[command(author, version, about)]
pub struct Args {
    /// HTML file to convert (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Output filename; `.pdf` is appended and unsafe characters replaced
    #[arg(short, long)]
    pub output: String,

    /// Directory to write the PDF into (defaults to the current directory)
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,

    /// JSON config file with endpoint, options, api_key and minify
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Generator endpoint URL
    #[arg(short, long)]
    pub endpoint: Option<Url>,

    /// Query option sent to the generator (repeatable), e.g. -O format=A4
    #[arg(short = 'O', long = "option", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub options: Vec<(String, String)>,

    /// API key sent as a Bearer token
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Send the HTML as-is instead of minifying it
    #[arg(long)]
    pub no_minify: bool,

    /// Connect timeout in seconds (1-600)
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub connect_timeout: u64,

    /// Overall request timeout in seconds (1-3600)
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: u64,

    /// Print the request that would be sent and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Builds the generator config: config file first, then CLI overrides.
    pub fn generator_config(&self) -> Result<GeneratorConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_json_file(path)?,
            None => GeneratorConfig::default(),
        };

        if self.api_key.is_some() {
            config = config.with_api_key(self.api_key.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.set_endpoint(endpoint.clone());
        }
        for (key, value) in &self.options {
            config.set_option(key.clone(), value.clone());
        }
        if self.no_minify {
            config = config.with_minify(false);
        }
        Ok(config)
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty option name in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_minimal_args_parses_successfully() {
        let args = Args::try_parse_from(["html-to-pdf", "-o", "out"]).unwrap();
        assert_eq!(args.output, "out");
        assert!(args.input.is_none());
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert_eq!(args.connect_timeout, 30);
        assert_eq!(args.timeout, 120);
    }

    #[test]
    fn test_cli_output_is_required() {
        let result = Args::try_parse_from(["html-to-pdf", "page.html"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["html-to-pdf", "-o", "x", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["html-to-pdf", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_repeated_options() {
        let args = Args::try_parse_from([
            "html-to-pdf",
            "-o",
            "x",
            "-O",
            "format=A4",
            "--option",
            "margin=1cm=2",
        ])
        .unwrap();
        assert_eq!(
            args.options,
            vec![
                ("format".to_string(), "A4".to_string()),
                ("margin".to_string(), "1cm=2".to_string()),
            ]
        );
    }

    #[test]
    fn test_cli_option_without_equals_rejected() {
        let err = Args::try_parse_from(["html-to-pdf", "-o", "x", "-O", "format"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_invalid_endpoint_rejected() {
        let err =
            Args::try_parse_from(["html-to-pdf", "-o", "x", "-e", "not a url"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_timeout_zero_rejected() {
        let err =
            Args::try_parse_from(["html-to-pdf", "-o", "x", "--timeout", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_generator_config_applies_overrides() {
        let args = Args::try_parse_from([
            "html-to-pdf",
            "-o",
            "x",
            "-e",
            "http://localhost:8080/generate",
            "-O",
            "format=A4",
            "--api-key",
            "k",
            "--no-minify",
        ])
        .unwrap();

        let config = args.generator_config().unwrap();
        assert_eq!(config.endpoint().as_str(), "http://localhost:8080/generate");
        assert_eq!(config.options().get("encoding").map(String::as_str), Some("utf-8"));
        assert_eq!(config.options().get("format").map(String::as_str), Some("A4"));
        assert_eq!(config.api_key(), Some("k"));
        assert!(!config.minify());
    }

    #[test]
    fn test_generator_config_missing_file_errors() {
        let args =
            Args::try_parse_from(["html-to-pdf", "-o", "x", "--config", "/nonexistent/c.json"])
                .unwrap();
        assert!(matches!(
            args.generator_config(),
            Err(ConfigError::Io { .. })
        ));
    }
}
