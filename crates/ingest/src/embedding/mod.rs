pub mod batcher;
pub mod cache;
pub mod openai;
pub mod traits;

pub use batcher::EmbeddingBatcher;
pub use cache::EmbeddingCache;
pub use openai::OpenAiEmbedder;
pub use traits::{Embedder, EmbeddingError};
