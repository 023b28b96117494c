//! CLI entry point for the html-to-pdf tool.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use html_to_pdf::{GeneratorClient, PdfResponder, ReqwestTransport};
use http::header::AUTHORIZATION;
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let html = read_input(args.input.as_deref())?;
    let config = args
        .generator_config()
        .context("failed to load generator configuration")?;
    debug!(?config, "generator configuration resolved");

    let transport = ReqwestTransport::with_timeouts(args.connect_timeout, args.timeout)
        .context("failed to build HTTP client")?;
    let client = GeneratorClient::new(transport, config);

    if args.dry_run {
        print_request(&client, &html)?;
        return Ok(());
    }

    let output_dir = args.output_dir.clone().unwrap_or_default();
    let responder = PdfResponder::new(client);

    info!(endpoint = %responder.client().endpoint(), "Generating PDF");
    match responder.write_file_in(&output_dir, &args.output, &html).await {
        Ok(path) => {
            info!(path = %path.display(), "PDF generation complete");
            println!("{}", path.display());
            Ok(())
        }
        Err(error) if error.is_rate_limited() => {
            match error.retry_after() {
                Some(at) => warn!(
                    retry_after = %httpdate::fmt_http_date(at),
                    "Generator rate limit reached; try again later"
                ),
                None => warn!("Generator rate limit reached; try again later"),
            }
            Err(error.into())
        }
        Err(error) => Err(error).context("PDF generation failed"),
    }
}

/// Reads HTML from the given file, or from stdin when no file is given.
fn read_input(input: Option<&Path>) -> Result<String> {
    if let Some(path) = input {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    if io::stdin().is_terminal() {
        bail!("no input provided; pass an HTML file or pipe HTML via stdin");
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read HTML from stdin")?;
    Ok(buffer)
}

/// Prints the outbound request without sending it. The API key is masked.
fn print_request(client: &GeneratorClient<ReqwestTransport>, html: &str) -> Result<()> {
    let request = client.build_request(html)?;
    println!("{} {}", request.method(), request.uri());
    for (name, value) in request.headers() {
        if name == AUTHORIZATION {
            println!("{name}: Bearer [redacted]");
        } else {
            println!("{name}: {}", value.to_str().unwrap_or("<binary>"));
        }
    }
    println!();
    println!("{}", String::from_utf8_lossy(request.body()));
    Ok(())
}

