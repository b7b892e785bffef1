use std::sync::Arc;

use super::traits::{Embedder, EmbeddingError};

/// Collects (chunk index, text) pairs and flushes when the batch is full.
pub struct EmbeddingBatcher {
    buffer: Vec<(usize, String)>,
    batch_size: usize,
    embedder: Arc<dyn Embedder>,
}

impl EmbeddingBatcher {
    /// A `batch_size` of zero is treated as one.
    pub fn new(embedder: Arc<dyn Embedder>, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            buffer: Vec::with_capacity(batch_size),
            batch_size,
            embedder,
        }
    }

    /// Add a text to the batch. Returns embeddings if the batch is full (auto-flush).
    pub async fn add(
        &mut self,
        index: usize,
        text: String,
    ) -> Result<Option<Vec<(usize, Vec<f32>)>>, EmbeddingError> {
        self.buffer.push((index, text));
        if self.buffer.len() >= self.batch_size {
            Ok(Some(self.flush().await?))
        } else {
            Ok(None)
        }
    }

    /// Force-flush remaining items.
    pub async fn flush(&mut self) -> Result<Vec<(usize, Vec<f32>)>, EmbeddingError> {
        if self.buffer.is_empty() {
            return Ok(Vec::new());
        }
        let batch: Vec<(usize, String)> = std::mem::take(&mut self.buffer);
        let texts: Vec<&str> = batch.iter().map(|(_, t)| t.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != batch.len() {
            return Err(EmbeddingError::CountMismatch {
                sent: batch.len(),
                received: embeddings.len(),
            });
        }
        tracing::debug!(batch = batch.len(), "flushed embedding batch");

        Ok(batch
            .into_iter()
            .zip(embeddings)
            .map(|((index, _), emb)| (index, emb))
            .collect())
    }

    /// Number of items currently buffered.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
