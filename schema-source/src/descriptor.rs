//! Source descriptors: which strategy to run, and where to read from.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{STDIN_LOCATOR, SourceError};

/// The three kinds of input a document can be resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Remote resource fetched over HTTP(S).
    Url,
    /// Local file.
    File,
    /// The process's standard input.
    Stdin,
}

impl SourceKind {
    /// Lowercase name, as used in serialized descriptors.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "url" => Ok(Self::Url),
            "file" => Ok(Self::File),
            "stdin" => Ok(Self::Stdin),
            _ => Err(SourceError::UnknownKind { kind: s.to_owned() }),
        }
    }
}

/// Identifies a single input document.
///
/// Serialized form: `{"type": "url", "path": "https://..."}`,
/// `{"type": "file", "path": "data.json"}` or `{"type": "stdin"}`.
/// Deserializing rejects unknown types and empty locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "path",
    rename_all = "lowercase",
    try_from = "RawDescriptor"
)]
pub enum SourceDescriptor {
    /// A remote resource fetched with HTTP GET.
    Url(String),
    /// A file on the local filesystem.
    File(PathBuf),
    /// The process's standard input.
    Stdin,
}

/// Unvalidated wire form of [`SourceDescriptor`].
#[derive(Deserialize)]
#[serde(tag = "type", content = "path", rename_all = "lowercase")]
enum RawDescriptor {
    Url(String),
    File(PathBuf),
    Stdin,
}

impl TryFrom<RawDescriptor> for SourceDescriptor {
    type Error = SourceError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        match raw {
            RawDescriptor::Url(url) => Self::url(url),
            RawDescriptor::File(path) => Self::file(path),
            RawDescriptor::Stdin => Ok(Self::Stdin),
        }
    }
}

impl SourceDescriptor {
    /// Descriptor for a remote resource.
    ///
    /// The URL's shape is not checked here; a malformed URL fails when the
    /// request is attempted.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::EmptyLocator` if `url` is empty.
    pub fn url(url: impl Into<String>) -> Result<Self, SourceError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(SourceError::EmptyLocator { kind: "url" });
        }
        Ok(Self::Url(url))
    }

    /// Descriptor for a local file.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::EmptyLocator` if `path` is empty.
    pub fn file(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(SourceError::EmptyLocator { kind: "file" });
        }
        Ok(Self::File(path))
    }

    /// Build a descriptor from a kind and an optional location.
    ///
    /// The location is ignored for `SourceKind::Stdin`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::EmptyLocator` if a URL or file kind has no
    /// (or an empty) location.
    pub fn from_parts(kind: SourceKind, locator: Option<&str>) -> Result<Self, SourceError> {
        match kind {
            SourceKind::Url => Self::url(locator.unwrap_or_default()),
            SourceKind::File => Self::file(locator.unwrap_or_default()),
            SourceKind::Stdin => Ok(Self::Stdin),
        }
    }

    /// Which strategy this descriptor selects.
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Url(_) => SourceKind::Url,
            Self::File(_) => SourceKind::File,
            Self::Stdin => SourceKind::Stdin,
        }
    }

    /// Human-readable location: the URL, the path, or `<stdin>`.
    #[must_use]
    pub fn locator(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => path.display().to_string(),
            Self::Stdin => STDIN_LOCATOR.to_owned(),
        }
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.locator())
    }
}
