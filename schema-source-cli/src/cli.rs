use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser};
use schema_source::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_BODY_SIZE, ErrorReporter, MAX_CHUNK_SIZE, SourceConfig,
    SourceDescriptor, SourceError, dispatch,
};
use thiserror::Error;
use tracing::info;

use crate::logging;
use crate::reporter::ConsoleReporter;
use crate::save::save_document;

/// A resolution failure that the reporter has already shown.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Reported(#[from] pub SourceError);

/// Resolve a JSON document from a URL, a file or stdin.
///
/// With neither `--url`, `--file` nor `--source`, the document is read from
/// standard input.
#[derive(Debug, Parser)]
#[command(name = "schema-source", version, about)]
pub struct Cli {
    /// Fetch the document from this URL (HTTP GET, must answer 200).
    #[arg(long, value_name = "URL", conflicts_with_all = ["file", "source"])]
    pub url: Option<String>,

    /// Read the document from this file.
    #[arg(long, value_name = "PATH", conflicts_with = "source")]
    pub file: Option<PathBuf>,

    /// Source as JSON, e.g. '{"type":"file","path":"in.json"}'.
    #[arg(long, value_name = "JSON")]
    pub source: Option<String>,

    /// Write the document here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also keep a copy of the document in this directory.
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Fail unless the document parses as JSON.
    #[arg(long)]
    pub check_json: bool,

    /// Maximum document size in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_BODY_SIZE)]
    pub max_body_size: u64,

    /// Read size in bytes for files and stdin (at most 16 MiB).
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_CHUNK_SIZE as u64)
    )]
    pub chunk_size: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The descriptor selected by the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if a locator is empty or `--source` is not a valid
    /// descriptor.
    pub fn descriptor(&self) -> Result<SourceDescriptor> {
        if let Some(url) = &self.url {
            return Ok(SourceDescriptor::url(url.as_str())?);
        }
        if let Some(path) = &self.file {
            return Ok(SourceDescriptor::file(path)?);
        }
        if let Some(raw) = &self.source {
            return serde_json::from_str(raw).context("Invalid --source descriptor");
        }
        Ok(SourceDescriptor::Stdin)
    }

    /// Resolution options from the flags.
    #[must_use]
    pub fn source_config(&self) -> SourceConfig {
        let mut config = SourceConfig::default();
        config.max_body_size = self.max_body_size;
        config.chunk_size = self.chunk_size;
        config
    }
}

/// Parse arguments, set up logging and run.
///
/// # Errors
///
/// Returns an error if resolution or delivery fails. Resolution errors are
/// returned as [`Reported`] after being shown on stderr.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let stdout = std::io::stdout();
    execute(&cli, &ConsoleReporter::new(), &mut stdout.lock()).await
}

/// Resolve the document and deliver it.
///
/// Failures to resolve go to `reporter` and come back wrapped in
/// [`Reported`]; every other error has not been shown yet.
///
/// # Errors
///
/// Returns an error if resolution fails, `--check-json` rejects the body, or
/// the document cannot be written.
pub async fn execute(
    cli: &Cli,
    reporter: &dyn ErrorReporter,
    stdout: &mut dyn Write,
) -> Result<()> {
    let descriptor = cli.descriptor()?;
    let config = cli.source_config();

    let mut resolved = None;
    dispatch(&descriptor, &config, reporter, |body| resolved = Some(body))
        .await
        .map_err(Reported)?;
    let body = resolved.unwrap_or_default();

    deliver(cli, &descriptor, &body, stdout)
}

/// Hand the resolved body to its destinations.
fn deliver(
    cli: &Cli,
    descriptor: &SourceDescriptor,
    body: &str,
    stdout: &mut dyn Write,
) -> Result<()> {
    if cli.check_json {
        serde_json::from_str::<serde_json::Value>(body).with_context(|| {
            format!("Document from {} is not valid JSON", descriptor.locator())
        })?;
    }

    if let Some(dir) = &cli.save_dir {
        let saved = save_document(dir, descriptor, body)?;
        info!(path = %saved.display(), "Saved document copy");
    }

    match &cli.output {
        Some(path) => {
            fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = body.len(), "Wrote document");
        }
        None => {
            stdout.write_all(body.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
