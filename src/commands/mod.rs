//! CLI command implementations for pathtidy operations.
//!
//! Each submodule handles one subcommand. The commands only acquire input,
//! load configuration and format output; all decision logic lives in the
//! library modules they call into.

pub mod analyze;
pub mod init;
pub mod optimize;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
pub use optimize::{handle_optimize, OptimizeConfig};

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{load_config, load_config_from_path, Config};

/// The character separating entries within one scope string.
pub const SCOPE_SEPARATOR: char = ';';

/// Raw entry lists for both scopes, as acquired from the CLI.
#[derive(Debug, Clone, Default)]
pub struct ScopeInput {
    pub user: Vec<String>,
    pub system: Vec<String>,
}

/// Splits a raw scope string into entries. Empty segments are kept so the
/// validator can flag them; an empty input string has no entries at all.
pub fn split_path_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        Vec::new()
    } else {
        raw.split(SCOPE_SEPARATOR).map(str::to_string).collect()
    }
}

/// Acquires the scope inputs from, in order of precedence: a two-line path
/// file, explicit arguments, the live PATH variable (user scope only).
pub fn read_scope_input(
    user_path: Option<String>,
    system_path: Option<String>,
    path_file: Option<&Path>,
) -> Result<ScopeInput> {
    if let Some(file) = path_file {
        let contents = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let mut lines = contents.lines();
        let user = lines.next().map(split_path_list).unwrap_or_default();
        let system = lines.next().map(split_path_list).unwrap_or_default();
        return Ok(ScopeInput { user, system });
    }

    let user = match user_path {
        Some(raw) => split_path_list(&raw),
        None if system_path.is_none() => {
            log::info!("no input given, falling back to the live PATH variable");
            std::env::var("PATH")
                .map(|raw| split_path_list(&raw))
                .unwrap_or_default()
        }
        None => Vec::new(),
    };
    let system = system_path.as_deref().map(split_path_list).unwrap_or_default();
    Ok(ScopeInput { user, system })
}

/// Loads the config from an explicit path or by discovery.
pub fn resolve_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    }
}

/// Opens the output sink: a file when requested, stdout otherwise.
pub fn open_output(output: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_empty_segments() {
        assert_eq!(split_path_list("C:\\a;;C:\\b"), vec!["C:\\a", "", "C:\\b"]);
    }

    #[test]
    fn test_split_empty_string_has_no_entries() {
        assert!(split_path_list("").is_empty());
    }

    #[test]
    fn test_path_file_wins_over_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paths.txt");
        std::fs::write(&file, "C:\\u1;C:\\u2\nC:\\s1\n").unwrap();
        let input = read_scope_input(
            Some("C:\\ignored".to_string()),
            None,
            Some(file.as_path()),
        )
        .unwrap();
        assert_eq!(input.user, vec!["C:\\u1", "C:\\u2"]);
        assert_eq!(input.system, vec!["C:\\s1"]);
    }

    #[test]
    fn test_explicit_arguments() {
        let input =
            read_scope_input(Some("C:\\u".to_string()), Some("C:\\s".to_string()), None).unwrap();
        assert_eq!(input.user, vec!["C:\\u"]);
        assert_eq!(input.system, vec!["C:\\s"]);
    }

    #[test]
    fn test_system_only_leaves_user_empty() {
        let input = read_scope_input(None, Some("C:\\s".to_string()), None).unwrap();
        assert!(input.user.is_empty());
        assert_eq!(input.system, vec!["C:\\s"]);
    }
}
