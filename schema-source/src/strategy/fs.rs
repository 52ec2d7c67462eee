//! Filesystem source.
//!
//! The existence check runs before anything is opened. A missing path is
//! reported and the read is abandoned; open and mid-read failures are
//! returned as ordinary errors rather than aborting the process.

use std::path::Path;

use tokio::io::AsyncRead;
use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::strategy::{decode_text, drain};

/// Read the whole file at `path` as text.
///
/// # Errors
///
/// - `SourceError::PathMissing` if `path` does not exist (no open is attempted)
/// - `SourceError::Open` if the file cannot be opened
/// - `SourceError::Read` if a read fails part way (e.g. `path` is a directory)
/// - `SourceError::TooLarge` if the file exceeds `config.max_body_size`
pub async fn read_file(path: &Path, config: &SourceConfig) -> Result<String, SourceError> {
    // A failed metadata lookup (e.g. permission denied on a parent) is left
    // for open to report with its real cause.
    if !tokio::fs::try_exists(path).await.unwrap_or(true) {
        return Err(SourceError::PathMissing {
            path: path.to_path_buf(),
        });
    }

    let locator = path.display().to_string();
    info!(path = %locator, "Reading file resource");

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|source| SourceError::Open {
            locator: locator.clone(),
            source,
        })?;

    read_stream(file, &locator, config).await
}

/// Read an already-open file stream to completion.
///
/// # Errors
///
/// Returns `SourceError::Read` or `SourceError::TooLarge`, see [`read_file`].
pub async fn read_stream<R>(
    reader: R,
    locator: &str,
    config: &SourceConfig,
) -> Result<String, SourceError>
where
    R: AsyncRead + Unpin,
{
    let body = drain(reader, locator, config).await?;
    debug!(path = %locator, bytes = body.len(), "file read complete");
    Ok(decode_text(body))
}
