//! Hierarchical text chunking.
//!
//! Splits a document into bounded-length chunks, preferring paragraph, line,
//! tab and word boundaries before falling back to fixed-width windows, and
//! stitches a configurable amount of trailing context from each chunk into
//! the next.

mod recursive;
mod types;

pub use recursive::RecursiveChunker;
pub use types::{ChunkConfig, DEFAULT_MAX_CHUNK_LENGTH, DEFAULT_OVERLAP_LENGTH, DEFAULT_SEPARATORS};
