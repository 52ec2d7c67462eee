//! Error types for source resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::report::failure_message;

/// Locator used in messages for the standard-input strategy.
pub const STDIN_LOCATOR: &str = "<stdin>";

/// A failure to resolve a source document.
///
/// `Display` renders the exact message handed to an
/// [`ErrorReporter`](crate::ErrorReporter).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The request never produced a response (DNS, connect, TLS, bad URL).
    #[error("{}", failure_message(.url, Some(.source)))]
    Request {
        /// The requested URL.
        url: String,
        /// Transport-level cause.
        source: reqwest::Error,
    },

    /// The server answered with a status other than `200 OK`.
    ///
    /// The status is kept for callers but is not part of the message.
    #[error("{}", failure_message(.url, None))]
    Status {
        /// The requested URL.
        url: String,
        /// The status code the server returned.
        status: u16,
    },

    /// The response arrived but its body could not be read.
    #[error("{}", failure_message(.url, Some(.source)))]
    Body {
        /// The requested URL.
        url: String,
        /// Cause of the body read failure.
        source: reqwest::Error,
    },

    /// The input file does not exist.
    #[error("File {} does not exist. Please specify a valid path.", .path.display())]
    PathMissing {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The input file exists but could not be opened.
    #[error("{}", failure_message(.locator, Some(.source)))]
    Open {
        /// The path, rendered for display.
        locator: String,
        /// I/O cause.
        source: std::io::Error,
    },

    /// A read failed after the stream was opened (file or stdin).
    #[error("{}", failure_message(.locator, Some(.source)))]
    Read {
        /// The path, or [`STDIN_LOCATOR`].
        locator: String,
        /// I/O cause.
        source: std::io::Error,
    },

    /// The body grew past the configured `max_body_size`.
    #[error("{}", failure_message(.locator, Some(&size_limit_cause(.limit))))]
    TooLarge {
        /// The URL, path, or [`STDIN_LOCATOR`].
        locator: String,
        /// The limit that was exceeded, in bytes.
        limit: u64,
    },

    /// A URL or file descriptor was built with an empty locator.
    #[error("A {kind} source requires a non-empty location")]
    EmptyLocator {
        /// Kind of descriptor being built.
        kind: &'static str,
    },

    /// A source kind string did not name one of `url`, `file`, `stdin`.
    #[error("Unknown source type '{kind}' (expected one of: url, file, stdin)")]
    UnknownKind {
        /// The rejected kind string.
        kind: String,
    },
}

impl SourceError {
    /// The URL, path or stdin marker this error refers to, if any.
    #[must_use]
    pub fn locator(&self) -> Option<String> {
        match self {
            Self::Request { url, .. } | Self::Status { url, .. } | Self::Body { url, .. } => {
                Some(url.clone())
            }
            Self::PathMissing { path } => Some(path.display().to_string()),
            Self::Open { locator, .. }
            | Self::Read { locator, .. }
            | Self::TooLarge { locator, .. } => Some(locator.clone()),
            Self::EmptyLocator { .. } | Self::UnknownKind { .. } => None,
        }
    }
}

fn size_limit_cause(limit: &u64) -> String {
    format!("body exceeds maximum size of {limit} bytes")
}
