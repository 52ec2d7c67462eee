//! Acquisition strategies, one per [`SourceKind`](crate::SourceKind).
//!
//! - `url`: HTTP GET, only `200 OK` is accepted
//! - `fs`: existence check, then a chunked read of the file
//! - `stdin`: chunked drain of the process's standard input
//!
//! The file and stdin strategies share [`drain`]; each takes a generic
//! reader entry point so chunking can be exercised without real I/O.

pub mod fs;
pub mod stdin;
pub mod url;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::config::SourceConfig;
use crate::error::SourceError;

/// Read `reader` to end-of-stream, appending each chunk in arrival order.
///
/// Stops with `SourceError::TooLarge` once the accumulated body passes
/// `config.max_body_size`, and with `SourceError::Read` on any I/O error.
pub(crate) async fn drain<R>(
    mut reader: R,
    locator: &str,
    config: &SourceConfig,
) -> Result<Vec<u8>, SourceError>
where
    R: AsyncRead + Unpin,
{
    let mut body = Vec::new();
    let mut chunk = vec![0u8; config.effective_chunk_size()];
    let mut chunks: usize = 0;

    loop {
        let n = reader
            .read(&mut chunk)
            .await
            .map_err(|source| SourceError::Read {
                locator: locator.to_owned(),
                source,
            })?;
        if n == 0 {
            break;
        }
        chunks += 1;
        trace!(locator, chunk = chunks, bytes = n, "read chunk");

        if (body.len() + n) as u64 > config.max_body_size {
            return Err(SourceError::TooLarge {
                locator: locator.to_owned(),
                limit: config.max_body_size,
            });
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Ok(body)
}

/// Decode an assembled body as UTF-8, replacing invalid sequences.
pub(crate) fn decode_text(body: Vec<u8>) -> String {
    match String::from_utf8(body) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
