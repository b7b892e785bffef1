use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Split documents into overlapping chunks and embed them.
#[derive(Parser, Debug)]
#[command(name = "layercut", version, about = "Hierarchical text chunker")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract and chunk a document (.txt, .md or .pdf)
    Chunk(ChunkArgs),
    /// Chunk a document and embed every chunk
    Embed(EmbedArgs),
}

/// Chunking overrides; unset flags fall back to the environment.
#[derive(Args, Debug, Default, Clone)]
pub struct ChunkFlags {
    /// Maximum chunk length in characters (env: CHUNK_MAX_LENGTH)
    #[arg(long, allow_negative_numbers = true)]
    pub max_chunk_length: Option<i64>,

    /// Characters carried over from the previous chunk (env: CHUNK_OVERLAP)
    #[arg(long, allow_negative_numbers = true)]
    pub overlap: Option<i64>,

    /// Separator, coarsest first; repeatable. Escapes: \n \t \s \\
    #[arg(long = "separator", value_name = "S")]
    pub separators: Vec<String>,

    /// Skip separator splitting and cut fixed-width windows only
    #[arg(long, conflicts_with = "separators")]
    pub no_separators: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct ChunkArgs {
    /// Document to chunk
    pub file: PathBuf,

    #[command(flatten)]
    pub chunking: ChunkFlags,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Document to embed
    pub file: PathBuf,

    #[command(flatten)]
    pub chunking: ChunkFlags,

    /// Embedding model (env: EMBEDDING_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// OpenAI-compatible base URL, e.g. http://localhost:11434/v1 (env: OPENAI_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// API key (env: OPENAI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
}
