//! Chunking strategies: PDF (page-aware) and whole-text.

use layercut_core::{ChunkError, RecursiveChunker};

use super::types::Chunk;
use crate::document::ExtractedDocument;

/// Chunk a document using a strategy appropriate for its file type.
///
/// Empty documents produce no chunks; the chunker itself is never asked to
/// split an empty page.
pub fn chunk_document(
    doc: &ExtractedDocument,
    chunker: &RecursiveChunker,
) -> Result<Vec<Chunk>, ChunkError> {
    let chunks = match doc.file_type.as_str() {
        "pdf" => chunk_pdf(doc, chunker)?,
        _ => chunk_text(doc, chunker)?,
    };
    tracing::debug!(
        filename = %doc.filename,
        chunks = chunks.len(),
        "chunked document"
    );
    Ok(chunks)
}

// ── Text strategy ───────────────────────────────────────────────────────────

fn chunk_text(doc: &ExtractedDocument, chunker: &RecursiveChunker) -> Result<Vec<Chunk>, ChunkError> {
    let full = doc.full_text();
    if full.is_empty() {
        return Ok(Vec::new());
    }
    Ok(chunker
        .split(&full)?
        .into_iter()
        .enumerate()
        .map(|(i, content)| Chunk::new(i, content, Some(1)))
        .collect())
}

// ── PDF strategy ────────────────────────────────────────────────────────────

fn chunk_pdf(doc: &ExtractedDocument, chunker: &RecursiveChunker) -> Result<Vec<Chunk>, ChunkError> {
    let mut all_chunks = Vec::new();

    // No overlap across page boundaries: each page is split on its own.
    for page in doc.pages.iter().filter(|p| !p.text.is_empty()) {
        for content in chunker.split(&page.text)? {
            all_chunks.push(Chunk::new(all_chunks.len(), content, Some(page.page_number)));
        }
    }
    Ok(all_chunks)
}
