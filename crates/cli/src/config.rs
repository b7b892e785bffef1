//! Turn command-line flags into configuration overrides.
//!
//! Flags are applied before the environment is read, so a set flag wins
//! even over a malformed env value.

use anyhow::{Context, Result};
use layercut_core::config::parse_separator;
use layercut_core::ConfigOverrides;

use crate::cli::{ChunkFlags, Command};

/// Collect the overrides for a subcommand.
/// Priority: cli flag > env var > built-in default.
pub fn overrides_for(command: &Command) -> Result<ConfigOverrides> {
    match command {
        Command::Chunk(args) => chunk_overrides(&args.chunking),
        Command::Embed(args) => Ok(ConfigOverrides {
            model: args.model.clone(),
            base_url: args.base_url.clone(),
            api_key: args.api_key.clone(),
            ..chunk_overrides(&args.chunking)?
        }),
    }
}

fn chunk_overrides(flags: &ChunkFlags) -> Result<ConfigOverrides> {
    let separators = if flags.no_separators {
        Some(Vec::new())
    } else if flags.separators.is_empty() {
        None
    } else {
        Some(
            flags
                .separators
                .iter()
                .map(|raw| parse_separator(raw).with_context(|| format!("bad --separator {raw:?}")))
                .collect::<Result<Vec<_>>>()?,
        )
    };

    Ok(ConfigOverrides {
        max_chunk_length: flags.max_chunk_length,
        overlap_length: flags.overlap,
        separators,
        ..ConfigOverrides::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ChunkArgs, EmbedArgs, OutputFormat};
    use std::path::PathBuf;

    fn chunk_command(chunking: ChunkFlags) -> Command {
        Command::Chunk(ChunkArgs {
            file: PathBuf::from("a.txt"),
            chunking,
            format: OutputFormat::Text,
        })
    }

    #[test]
    fn unset_flags_override_nothing() {
        let overrides = overrides_for(&chunk_command(ChunkFlags::default())).unwrap();
        assert_eq!(overrides, ConfigOverrides::default());
    }

    #[test]
    fn chunk_flags_become_overrides() {
        let flags = ChunkFlags {
            max_chunk_length: Some(40),
            overlap: Some(0),
            separators: vec!["\\n".to_string(), ", ".to_string()],
            no_separators: false,
        };
        let overrides = overrides_for(&chunk_command(flags)).unwrap();
        assert_eq!(overrides.max_chunk_length, Some(40));
        assert_eq!(overrides.overlap_length, Some(0));
        assert_eq!(overrides.separators, Some(vec!["\n".to_string(), ", ".to_string()]));
    }

    #[test]
    fn no_separators_is_an_empty_list() {
        let flags = ChunkFlags {
            no_separators: true,
            ..ChunkFlags::default()
        };
        let overrides = overrides_for(&chunk_command(flags)).unwrap();
        assert_eq!(overrides.separators, Some(Vec::new()));
    }

    #[test]
    fn bad_escape_is_an_error() {
        let flags = ChunkFlags {
            separators: vec!["\\x".to_string()],
            ..ChunkFlags::default()
        };
        assert!(overrides_for(&chunk_command(flags)).is_err());
    }

    #[test]
    fn embed_flags_are_carried() {
        let command = Command::Embed(EmbedArgs {
            file: PathBuf::from("a.txt"),
            chunking: ChunkFlags {
                max_chunk_length: Some(12),
                ..ChunkFlags::default()
            },
            model: Some("bge-m3".to_string()),
            base_url: None,
            api_key: Some("sk-flag".to_string()),
        });
        let overrides = overrides_for(&command).unwrap();
        assert_eq!(overrides.max_chunk_length, Some(12));
        assert_eq!(overrides.model.as_deref(), Some("bge-m3"));
        assert!(overrides.base_url.is_none());
        assert_eq!(overrides.api_key.as_deref(), Some("sk-flag"));
    }
}
