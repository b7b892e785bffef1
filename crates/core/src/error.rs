use thiserror::Error;

/// Raised by the chunker when its fixed-width fallback cannot make progress.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error(
        "Invalid split step: {step} (max_chunk_length={max_chunk_length}, overlap_length={overlap_length})"
    )]
    InvalidStep {
        step: i64,
        max_chunk_length: i64,
        overlap_length: i64,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
