//! Chunker configuration.

use serde::{Deserialize, Serialize};

/// Separators tried from coarsest to finest: paragraph, line, tab, word.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", "\t", " "];

/// Default maximum chunk length, in characters.
pub const DEFAULT_MAX_CHUNK_LENGTH: i64 = 8000;

/// Default number of trailing characters carried into the next chunk.
pub const DEFAULT_OVERLAP_LENGTH: i64 = 200;

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for [`RecursiveChunker`](super::RecursiveChunker).
///
/// All lengths count Unicode scalar values, not bytes. Both lengths are
/// signed: non-positive values are accepted here and only rejected when
/// the fixed-width fallback is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Upper bound on a merged chunk before overlap is prepended (default: 8000).
    pub max_chunk_length: i64,
    /// Trailing characters of each chunk repeated at the start of the next (default: 200).
    pub overlap_length: i64,
    /// Separators in priority order, coarsest first.
    pub separators: Vec<String>,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_length: DEFAULT_MAX_CHUNK_LENGTH,
            overlap_length: DEFAULT_OVERLAP_LENGTH,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ChunkConfig {
    /// Config with the default separators and the given lengths.
    pub fn new(max_chunk_length: i64, overlap_length: i64) -> Self {
        Self {
            max_chunk_length,
            overlap_length,
            ..Self::default()
        }
    }

    /// Replace the separator list.
    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }
}
