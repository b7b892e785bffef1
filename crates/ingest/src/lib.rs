//! Document ingestion: text extraction, chunking and embedding.

pub mod document;
pub mod embedding;
pub mod pipeline;

pub use document::chunker::{chunk_document, Chunk};
pub use document::{extract_text, parser_for, ExtractedDocument, ExtractionError, Parser};
pub use embedding::{Embedder, EmbeddingError, OpenAiEmbedder};
pub use pipeline::{EmbeddedChunk, IngestError, IngestPipeline};
