//! Standard-input source.

use tokio::io::AsyncRead;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::{STDIN_LOCATOR, SourceError};
use crate::strategy::{decode_text, drain};

/// Drain the process's standard input until end-of-stream.
///
/// May see zero, one or many chunks; the body is delivered once, after EOF.
/// Blocks forever if stdin is never closed.
///
/// # Errors
///
/// Returns `SourceError::Read` on a stream error and
/// `SourceError::TooLarge` if the input exceeds `config.max_body_size`.
pub async fn read_stdin(config: &SourceConfig) -> Result<String, SourceError> {
    debug!("Waiting for input on stdin");
    read_from(tokio::io::stdin(), config).await
}

/// Drain any reader the way stdin is drained.
///
/// # Errors
///
/// See [`read_stdin`].
pub async fn read_from<R>(reader: R, config: &SourceConfig) -> Result<String, SourceError>
where
    R: AsyncRead + Unpin,
{
    let body = drain(reader, STDIN_LOCATOR, config).await?;
    debug!(bytes = body.len(), "stdin closed");
    Ok(decode_text(body))
}
