use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chunker::ChunkConfig;
use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

/// Like [`profiled_env_opt`] but keeps an explicitly empty value.
fn profiled_env_raw(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        if let Ok(v) = env::var(format!("{}_{}", profile, key)) {
            return Some(v);
        }
    }
    env::var(key).ok()
}

fn profiled_env_parse<T>(profile: &str, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    profiled_env_opt(profile, key)
        .map(|raw| {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub chunker: ChunkConfig,
    pub embedding: EmbeddingConfig,
}

/// Values supplied outside the environment (e.g. command-line flags).
/// A set field wins over its env var, which is then never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub max_chunk_length: Option<i64>,
    pub overlap_length: Option<i64>,
    pub separators: Option<Vec<String>>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `LAYERCUT_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(&ConfigOverrides::default())
    }

    /// Like [`from_env`](Self::from_env), with `overrides` taking precedence.
    pub fn from_env_with(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let profile = env_or("LAYERCUT_PROFILE", "").to_uppercase();
        Self::for_profile_with(&profile, overrides)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Result<Self, ConfigError> {
        Self::for_profile_with(profile, &ConfigOverrides::default())
    }

    pub fn for_profile_with(profile: &str, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Ok(Self {
            profile: p.to_string(),
            chunker: chunk_config_from_env_profiled(p, overrides)?,
            embedding: EmbeddingConfig::from_env_profiled(p, overrides)?,
        })
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  chunker:     max_chunk_length={}, overlap_length={}, separators={:?}",
            self.chunker.max_chunk_length,
            self.chunker.overlap_length,
            self.chunker.separators
        );
        tracing::info!(
            "  embedding:   model={}, base_url={}, api_key={}",
            self.embedding.model,
            self.embedding.base_url,
            if self.embedding.api_key.is_some() { "(set)" } else { "(none)" }
        );
    }
}

// ── Chunker ───────────────────────────────────────────────────

fn chunk_config_from_env_profiled(
    p: &str,
    overrides: &ConfigOverrides,
) -> Result<ChunkConfig, ConfigError> {
    let defaults = ChunkConfig::default();
    let separators = match (&overrides.separators, profiled_env_raw(p, "CHUNK_SEPARATORS")) {
        (Some(separators), _) => separators.clone(),
        (None, Some(raw)) => parse_separators(&raw)?,
        (None, None) => defaults.separators,
    };
    let max_chunk_length = match overrides.max_chunk_length {
        Some(max) => max,
        None => profiled_env_parse(p, "CHUNK_MAX_LENGTH")?.unwrap_or(defaults.max_chunk_length),
    };
    let overlap_length = match overrides.overlap_length {
        Some(overlap) => overlap,
        None => profiled_env_parse(p, "CHUNK_OVERLAP")?.unwrap_or(defaults.overlap_length),
    };
    Ok(ChunkConfig {
        max_chunk_length,
        overlap_length,
        separators,
    })
}

/// Parse a comma-separated separator list.
///
/// Supported escapes: `\n`, `\t`, `\s` (space), `\,` (comma) and `\\`.
/// Empty items are skipped, so an empty string means "no separators".
pub fn parse_separators(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut separators = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => current.push(unescape(raw, chars.next())?),
            ',' => separators.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    separators.push(current);

    Ok(separators.into_iter().filter(|s| !s.is_empty()).collect())
}

/// Unescape a single separator given on the command line (commas are literal).
pub fn parse_separator(raw: &str) -> Result<String, ConfigError> {
    let mut separator = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => separator.push(unescape(raw, chars.next())?),
            other => separator.push(other),
        }
    }
    Ok(separator)
}

fn unescape(raw: &str, escaped: Option<char>) -> Result<char, ConfigError> {
    match escaped {
        Some('n') => Ok('\n'),
        Some('t') => Ok('\t'),
        Some('s') => Ok(' '),
        Some(',') => Ok(','),
        Some('\\') => Ok('\\'),
        other => Err(ConfigError::InvalidValue {
            key: "separator".to_string(),
            value: raw.to_string(),
            reason: match other {
                Some(c) => format!("unsupported escape \\{c}"),
                None => "trailing backslash".to_string(),
            },
        }),
    }
}

// ── Embedding ─────────────────────────────────────────────────

/// OpenAI-compatible embedding endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub model: String,
    /// Base URL including the API version prefix, e.g. `http://localhost:11434/v1`.
    pub base_url: String,
    pub api_key: Option<String>,
    /// Expected vector size; unchecked when unset.
    pub dimensions: Option<usize>,
    pub batch_size: usize,
    pub cache_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "nomic-embed-text".to_string(),
            base_url: "http://localhost:11434/v1".to_string(),
            api_key: None,
            dimensions: None,
            batch_size: 64,
            cache_size: 1024,
        }
    }
}

impl EmbeddingConfig {
    fn from_env_profiled(p: &str, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            model: overrides
                .model
                .clone()
                .unwrap_or_else(|| profiled_env_or(p, "EMBEDDING_MODEL", &defaults.model)),
            base_url: overrides
                .base_url
                .clone()
                .unwrap_or_else(|| profiled_env_or(p, "OPENAI_BASE_URL", &defaults.base_url)),
            api_key: overrides
                .api_key
                .clone()
                .or_else(|| profiled_env_opt(p, "OPENAI_API_KEY")),
            dimensions: profiled_env_parse(p, "EMBEDDING_DIMENSIONS")?,
            batch_size: profiled_env_parse(p, "EMBEDDING_BATCH_SIZE")?
                .unwrap_or(defaults.batch_size),
            cache_size: profiled_env_parse(p, "EMBEDDING_CACHE_SIZE")?
                .unwrap_or(defaults.cache_size),
        })
    }
}
