//! Document-level chunking.
//!
//! Feeds extracted documents through the core [`RecursiveChunker`], keeping
//! page attribution for PDFs and numbering chunks across the whole document.
//!
//! [`RecursiveChunker`]: layercut_core::RecursiveChunker

mod strategies;
mod types;

pub use strategies::chunk_document;
pub use types::Chunk;
