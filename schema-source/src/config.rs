//! Configuration for source resolution.
//!
//! Applies to every strategy. Construct with `SourceConfig::default()` and
//! override individual fields.

/// Default cap on a resolved body: 64 MiB.
pub const DEFAULT_MAX_BODY_SIZE: u64 = 67_108_864;

/// Default read size for file and stdin chunks.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Largest read buffer allocated for a single chunk: 16 MiB.
pub const MAX_CHUNK_SIZE: usize = 16_777_216;

/// Options shared by the network, file and stdin strategies.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SourceConfig {
    /// Maximum body size in bytes (default: 64 MiB).
    /// Reads stop with `SourceError::TooLarge` once this is exceeded.
    pub max_body_size: u64,
    /// Bytes requested per read from a file or stdin (default: 8 KiB).
    /// A value of 0 is treated as 1; see [`SourceConfig::effective_chunk_size`].
    pub chunk_size: usize,
    /// `User-Agent` header sent with URL requests.
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            user_agent: concat!("schema-source/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl SourceConfig {
    /// Size of the read buffer actually allocated.
    ///
    /// `chunk_size` clamped to `1..=MAX_CHUNK_SIZE`, and never more than one
    /// byte past `max_body_size`.
    #[must_use]
    pub fn effective_chunk_size(&self) -> usize {
        let body_cap = usize::try_from(self.max_body_size.saturating_add(1)).unwrap_or(usize::MAX);
        self.chunk_size.min(MAX_CHUNK_SIZE).min(body_cap).max(1)
    }
}
