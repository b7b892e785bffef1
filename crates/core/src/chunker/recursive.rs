//! Recursive separator-based splitting with a fixed-width fallback.

use tracing::{debug, warn};

use super::types::ChunkConfig;
use crate::error::ChunkError;

/// Splits documents into chunks of at most `max_chunk_length` characters.
///
/// The chunker is an immutable value: build it once and call
/// [`split`](Self::split) from any number of threads.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    max_chunk_length: i64,
    overlap_length: i64,
    separators: Vec<String>,
}

impl Default for RecursiveChunker {
    fn default() -> Self {
        Self::new(ChunkConfig::default())
    }
}

impl RecursiveChunker {
    /// Build a chunker. Empty separators are dropped since splitting on an
    /// empty pattern never shortens anything.
    pub fn new(config: ChunkConfig) -> Self {
        let ChunkConfig {
            max_chunk_length,
            overlap_length,
            separators,
        } = config;

        let separators = separators
            .into_iter()
            .filter(|sep| {
                if sep.is_empty() {
                    warn!("dropping empty separator from chunker configuration");
                }
                !sep.is_empty()
            })
            .collect();

        Self {
            max_chunk_length,
            overlap_length,
            separators,
        }
    }

    pub fn max_chunk_length(&self) -> i64 {
        self.max_chunk_length
    }

    pub fn overlap_length(&self) -> i64 {
        self.overlap_length
    }

    pub fn separators(&self) -> &[String] {
        &self.separators
    }

    /// Split `document` into an ordered sequence of chunks.
    ///
    /// A document that already fits is returned verbatim as the only chunk.
    /// Otherwise separators are tried coarsest first: when every part of a
    /// split fits, the parts are greedily merged back together and overlap
    /// is prepended; when any part is too long, each part is split again
    /// with the remaining separators. Once separators run out the text is
    /// cut into fixed-width windows.
    ///
    /// The empty document always yields `[""]`.
    pub fn split(&self, document: &str) -> Result<Vec<String>, ChunkError> {
        if document.is_empty() {
            return Ok(vec![String::new()]);
        }

        let chunks = self.split_recursive(document, &self.separators)?;
        debug!(
            chars = char_len(document),
            chunks = chunks.len(),
            max_chunk_length = self.max_chunk_length,
            overlap_length = self.overlap_length,
            "split document"
        );
        Ok(chunks)
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Result<Vec<String>, ChunkError> {
        if self.fits(char_len(text)) {
            return Ok(vec![text.to_string()]);
        }

        let Some((sep, rest)) = separators.split_first() else {
            return self.hard_split(text);
        };

        let parts: Vec<&str> = text.split(sep.as_str()).filter(|p| !p.is_empty()).collect();

        // A single oversized part disables merging for all of its siblings.
        if parts.iter().all(|part| self.fits(char_len(part))) {
            return Ok(self.merge_parts(&parts, sep));
        }

        let mut chunks = Vec::new();
        for part in parts {
            chunks.extend(self.split_recursive(part, rest)?);
        }
        Ok(chunks)
    }

    /// Cut `text` into windows of `max_chunk_length` characters, each
    /// starting `step` characters after the previous one.
    fn hard_split(&self, text: &str) -> Result<Vec<String>, ChunkError> {
        let step = if self.overlap_length < self.max_chunk_length {
            self.max_chunk_length.saturating_sub(self.overlap_length)
        } else {
            self.max_chunk_length
        };

        if step <= 0 || self.max_chunk_length <= 0 {
            return Err(ChunkError::InvalidStep {
                step,
                max_chunk_length: self.max_chunk_length,
                overlap_length: self.overlap_length,
            });
        }

        let width = usize::try_from(self.max_chunk_length).unwrap_or(usize::MAX);
        let step = usize::try_from(step).unwrap_or(usize::MAX);

        // Byte offset of every char boundary, including the end of the text.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let total = boundaries.len() - 1;

        let windows = (0..total)
            .step_by(step)
            .map(|start| {
                let end = start.saturating_add(width).min(total);
                text[boundaries[start]..boundaries[end]].to_string()
            })
            .collect();
        Ok(windows)
    }

    /// Greedily pack `parts` (each known to fit) into chunks joined by `sep`,
    /// then prepend overlap.
    fn merge_parts(&self, parts: &[&str], sep: &str) -> Vec<String> {
        let sep_len = char_len(sep);
        let mut merged = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for part in parts {
            let part_len = char_len(part);
            let addition_len = if current.is_empty() {
                part_len
            } else {
                sep_len + part_len
            };

            if self.fits(current_len + addition_len) {
                if !current.is_empty() {
                    current.push_str(sep);
                }
                current.push_str(part);
                current_len += addition_len;
            } else {
                merged.push(std::mem::take(&mut current));
                current.push_str(part);
                current_len = part_len;
            }
        }

        if !current.is_empty() {
            merged.push(current);
        }

        self.apply_overlap(merged)
    }

    /// Prefix every chunk after the first with the tail of its predecessor.
    /// Tails come from the merged chunks, so overlap never compounds.
    fn apply_overlap(&self, merged: Vec<String>) -> Vec<String> {
        if self.overlap_length <= 0 {
            return merged;
        }
        let overlap = usize::try_from(self.overlap_length).unwrap_or(usize::MAX);

        let mut overlapped = Vec::with_capacity(merged.len());
        let mut previous: Option<&str> = None;
        for chunk in &merged {
            match previous {
                Some(prev) => overlapped.push(format!("{}{chunk}", char_suffix(prev, overlap))),
                None => overlapped.push(chunk.clone()),
            }
            previous = Some(chunk);
        }
        overlapped
    }

    fn fits(&self, len: usize) -> bool {
        i64::try_from(len).map_or(false, |len| len <= self.max_chunk_length)
    }
}

/// Length in Unicode scalar values.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The last `n` characters of `text`, or all of it when shorter.
pub(crate) fn char_suffix(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((offset, _)) => &text[offset..],
        None => text,
    }
}
