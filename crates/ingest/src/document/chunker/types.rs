//! Chunk output type.

use serde::Serialize;

/// A chunk of text with metadata for attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// 0-based index within the document.
    pub index: usize,
    /// The chunk text content, overlap prefix included.
    pub content: String,
    /// Page number (from PDF page or 1 for TXT/MD).
    pub page_number: Option<usize>,
    /// Length of `content` in characters.
    pub char_count: usize,
}

impl Chunk {
    pub(crate) fn new(index: usize, content: String, page_number: Option<usize>) -> Self {
        let char_count = content.chars().count();
        Self {
            index,
            content,
            page_number,
            char_count,
        }
    }
}
