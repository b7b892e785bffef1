mod cli;
mod config;

use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use layercut_core::config::load_dotenv;
use layercut_core::{Config, RecursiveChunker};
use layercut_ingest::{chunk_document, extract_text, Chunk, IngestPipeline, OpenAiEmbedder};
use tracing::info;

use crate::cli::{ChunkArgs, CliArgs, Command, EmbedArgs, OutputFormat};
use crate::config::overrides_for;

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();

    // Logs go to stderr; stdout carries chunk output only.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let overrides = overrides_for(&args.command)?;
    let config = Config::from_env_with(&overrides).context("failed to load configuration")?;
    config.log_summary();

    match args.command {
        Command::Chunk(chunk) => run_chunk(&config, &chunk),
        Command::Embed(embed) => run_embed(&config, &embed).await,
    }
}

fn read_document(path: &Path) -> Result<(Vec<u8>, String)> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((bytes, filename))
}

fn run_chunk(config: &Config, args: &ChunkArgs) -> Result<()> {
    let chunker = RecursiveChunker::new(config.chunker.clone());
    let (bytes, filename) = read_document(&args.file)?;

    let doc = extract_text(&bytes, &filename)
        .with_context(|| format!("failed to extract text from {filename}"))?;
    let chunks = chunk_document(&doc, &chunker).context("chunking failed")?;
    info!(filename = %filename, chunks = chunks.len(), "chunked");

    let mut out = BufWriter::new(io::stdout().lock());
    for chunk in &chunks {
        match args.format {
            OutputFormat::Json => serde_json::to_writer(&mut out, chunk)?,
            OutputFormat::Text => write_text_chunk(&mut out, chunk)?,
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn write_text_chunk(out: &mut impl Write, chunk: &Chunk) -> io::Result<()> {
    match chunk.page_number {
        Some(page) => writeln!(
            out,
            "--- chunk {} (page {}, {} chars) ---",
            chunk.index, page, chunk.char_count
        )?,
        None => writeln!(out, "--- chunk {} ({} chars) ---", chunk.index, chunk.char_count)?,
    }
    write!(out, "{}", chunk.content)
}

async fn run_embed(config: &Config, args: &EmbedArgs) -> Result<()> {
    let embedding = &config.embedding;
    let (bytes, filename) = read_document(&args.file)?;

    let embedder = OpenAiEmbedder::new(
        embedding.model.clone(),
        embedding.api_key.clone(),
        Some(embedding.base_url.clone()),
        embedding.dimensions,
    );
    let pipeline = IngestPipeline::new(
        RecursiveChunker::new(config.chunker.clone()),
        Arc::new(embedder),
        embedding.batch_size,
        embedding.cache_size,
    );

    let embedded = pipeline
        .run(&bytes, &filename)
        .await
        .with_context(|| format!("failed to embed {filename}"))?;

    let mut out = BufWriter::new(io::stdout().lock());
    for item in &embedded {
        serde_json::to_writer(&mut out, item)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
