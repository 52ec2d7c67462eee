//! # schema-source
//!
//! Resolves the input document for JSON schema generation from one of three
//! places: a remote URL, a local file, or standard input. The result is
//! always the complete body as a `String`; nothing is streamed to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use schema_source::{SourceConfig, SourceDescriptor, resolve};
//!
//! # async fn run() -> Result<(), schema_source::SourceError> {
//! let source = SourceDescriptor::url("https://example.com/sample.json")?;
//! let body = resolve(&source, &SourceConfig::default()).await?;
//! println!("{} bytes", body.len());
//! # Ok(())
//! # }
//! ```
//!
//! Callers that prefer a callback plus a reporter can use [`dispatch`],
//! which invokes exactly one of the two.

mod config;
mod descriptor;
mod error;
pub mod report;
pub mod strategy;

pub use config::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_BODY_SIZE, MAX_CHUNK_SIZE, SourceConfig};
pub use descriptor::{SourceDescriptor, SourceKind};
pub use error::{STDIN_LOCATOR, SourceError};
pub use report::{ErrorReporter, RecordingReporter};

use tracing::debug;

/// Resolve `source` to its full textual body.
///
/// Runs exactly one strategy, selected by the descriptor's variant. No
/// fallback between strategies and no retry.
///
/// # Errors
///
/// Returns the strategy's `SourceError`; see [`strategy::url::fetch_resource`],
/// [`strategy::fs::read_file`] and [`strategy::stdin::read_stdin`].
pub async fn resolve(
    source: &SourceDescriptor,
    config: &SourceConfig,
) -> Result<String, SourceError> {
    debug!(kind = %source.kind(), locator = %source.locator(), "resolving source");
    match source {
        SourceDescriptor::Url(url) => strategy::url::fetch_resource(url, config).await,
        SourceDescriptor::File(path) => strategy::fs::read_file(path, config).await,
        SourceDescriptor::Stdin => strategy::stdin::read_stdin(config).await,
    }
}

/// Resolve `source` and hand the outcome to exactly one of two sinks.
///
/// On success `continuation` receives the body; on failure `reporter`
/// receives the rendered message. Never both, never neither, never twice.
/// The error is also returned so the caller decides whether to exit.
///
/// # Errors
///
/// Returns the same error that was reported.
pub async fn dispatch<F>(
    source: &SourceDescriptor,
    config: &SourceConfig,
    reporter: &dyn ErrorReporter,
    continuation: F,
) -> Result<(), SourceError>
where
    F: FnOnce(String),
{
    deliver(resolve(source, config).await, reporter, continuation)
}

/// Route a finished resolution to the continuation or the reporter.
fn deliver<F>(
    outcome: Result<String, SourceError>,
    reporter: &dyn ErrorReporter,
    continuation: F,
) -> Result<(), SourceError>
where
    F: FnOnce(String),
{
    match outcome {
        Ok(body) => {
            continuation(body);
            Ok(())
        }
        Err(err) => {
            reporter.report(&err.to_string());
            Err(err)
        }
    }
}
