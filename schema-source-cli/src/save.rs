//! Keeping a local copy of the resolved document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use percent_encoding::percent_decode_str;
use schema_source::SourceDescriptor;
use url::Url;

/// File name used for stdin input.
pub const STDIN_FILE_NAME: &str = "stdin.json";

/// Fallback when no usable name can be derived from the source.
pub const FALLBACK_FILE_NAME: &str = "document.json";

/// Pick a file name for the saved copy of `source`.
///
/// - URL: last non-empty path segment, percent-decoded
/// - File: the input file's name
/// - Stdin: [`STDIN_FILE_NAME`]
///
/// Names are reduced to `[A-Za-z0-9._-]`; a name without an extension gets
/// `.json`, and anything empty or dot-only becomes [`FALLBACK_FILE_NAME`].
#[must_use]
pub fn document_file_name(source: &SourceDescriptor) -> String {
    let raw = match source {
        SourceDescriptor::Url(url) => url_file_name(url).unwrap_or_default(),
        SourceDescriptor::File(path) => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        SourceDescriptor::Stdin => return STDIN_FILE_NAME.to_owned(),
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        return FALLBACK_FILE_NAME.to_owned();
    }
    if cleaned.contains('.') {
        cleaned
    } else {
        format!("{cleaned}.json")
    }
}

/// Last non-empty path segment of `url`, or `None` if it does not parse.
fn url_file_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.rfind(|s| !s.is_empty())?;
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    if decoded == "." || decoded == ".." {
        return None;
    }
    Some(decoded.into_owned())
}

/// Write `body` into `dir`, creating the directory if needed.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written.
pub fn save_document(dir: &Path, source: &SourceDescriptor, body: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    let target = dir.join(document_file_name(source));
    fs::write(&target, body).with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}
