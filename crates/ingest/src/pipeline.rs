//! Extract, chunk and embed a single document.

use std::sync::Arc;

use layercut_core::{ChunkError, RecursiveChunker};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::document::chunker::{chunk_document, Chunk};
use crate::document::{extract_text, ExtractionError};
use crate::embedding::{Embedder, EmbeddingBatcher, EmbeddingCache, EmbeddingError};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Chunk(#[from] ChunkError),
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

/// A chunk together with its embedding vector.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddedChunk {
    #[serde(flatten)]
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

pub struct IngestPipeline {
    chunker: RecursiveChunker,
    embedder: Arc<dyn Embedder>,
    batch_size: usize,
    cache: Mutex<EmbeddingCache>,
}

impl IngestPipeline {
    pub fn new(
        chunker: RecursiveChunker,
        embedder: Arc<dyn Embedder>,
        batch_size: usize,
        cache_size: usize,
    ) -> Self {
        Self {
            chunker,
            embedder,
            batch_size,
            cache: Mutex::new(EmbeddingCache::new(cache_size)),
        }
    }

    pub fn chunker(&self) -> &RecursiveChunker {
        &self.chunker
    }

    /// Extract and chunk without embedding.
    pub fn chunk(&self, bytes: &[u8], filename: &str) -> Result<Vec<Chunk>, IngestError> {
        let doc = extract_text(bytes, filename)?;
        let chunks = chunk_document(&doc, &self.chunker)?;
        debug!(
            filename,
            chars = doc.total_chars(),
            chunks = chunks.len(),
            "chunked document"
        );
        Ok(chunks)
    }

    /// Extract, chunk and embed a document.
    ///
    /// Cached texts are served from the LRU; the rest go to the embedder in
    /// batches of `batch_size`. Output keeps chunk order.
    pub async fn run(&self, bytes: &[u8], filename: &str) -> Result<Vec<EmbeddedChunk>, IngestError> {
        let chunks = self.chunk(bytes, filename)?;
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let mut embeddings: Vec<Option<Vec<f32>>> = vec![None; chunks.len()];

        // The cache lock is never held across an embedder call.
        let misses: Vec<usize> = {
            let mut cache = self.cache.lock().await;
            chunks
                .iter()
                .filter(|chunk| match cache.get(&chunk.content) {
                    Some(vector) => {
                        embeddings[chunk.index] = Some(vector);
                        false
                    }
                    None => true,
                })
                .map(|chunk| chunk.index)
                .collect()
        };

        let mut batcher = EmbeddingBatcher::new(self.embedder.clone(), self.batch_size);
        let mut fresh = Vec::with_capacity(misses.len());
        for index in misses {
            if let Some(done) = batcher.add(index, chunks[index].content.clone()).await? {
                fresh.extend(done);
            }
        }
        fresh.extend(batcher.flush().await?);

        let fresh_count = fresh.len();
        {
            let mut cache = self.cache.lock().await;
            for (index, vector) in fresh {
                cache.put(&chunks[index].content, vector.clone());
                embeddings[index] = Some(vector);
            }
            debug!(
                embedded = fresh_count,
                cached = chunks.len() - fresh_count,
                hit_rate = cache.hit_rate(),
                "embedding cache"
            );
        }

        let embedded: Vec<EmbeddedChunk> = chunks
            .into_iter()
            .zip(embeddings)
            .filter_map(|(chunk, embedding)| {
                embedding.map(|embedding| EmbeddedChunk { chunk, embedding })
            })
            .collect();

        info!(filename, chunks = embedded.len(), "embedded document");
        Ok(embedded)
    }
}
