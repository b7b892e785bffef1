//! Core of layercut: the hierarchical text chunker, configuration and errors.
//!
//! The chunker is pure and synchronous. Producing its input (document
//! extraction) and consuming its output (embedding) live in `layercut-ingest`.

pub mod chunker;
pub mod config;
pub mod error;

pub use chunker::{ChunkConfig, RecursiveChunker};
pub use config::{Config, ConfigOverrides, EmbeddingConfig};
pub use error::*;
