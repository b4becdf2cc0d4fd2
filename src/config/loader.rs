use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::core::{Config, PathtidyConfig};

pub const CONFIG_FILE_NAME: &str = "pathtidy.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parses a TOML string into the raw config schema.
pub fn parse_config(contents: &str) -> Result<PathtidyConfig, String> {
    toml::from_str::<PathtidyConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Loads and compiles a config file. Unlike discovery, an unreadable or
/// invalid file here is a hard error: the caller named the file explicitly.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let contents = read_config_file(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let schema = parse_config(&contents).map_err(|e| anyhow::anyhow!(e))?;
    schema
        .compile()
        .with_context(|| format!("invalid configuration in {}", path.display()))
}

/// Generates directory ancestors up to a depth limit.
pub(crate) fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discovers `pathtidy.toml` by walking ancestor directories of the current
/// directory. A missing file falls back to the built-in defaults; a file that
/// exists but fails to parse or compile is a hard error, so a typo in a
/// pattern never silently degrades to default behavior.
pub fn load_config() -> Result<Config> {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Failed to get current directory: {}. Using default config.", e);
            return Ok(Config::default());
        }
    };

    let found = directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file());

    match found {
        Some(path) => {
            log::debug!("Loading config from {}", path.display());
            load_config_from_path(&path)
        }
        None => {
            log::debug!(
                "No {} found after checking {} directories. Using default config.",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH
            );
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let schema = parse_config("").unwrap();
        assert_eq!(schema.max_path_length, 8191);
        assert!(schema.behavior.remove_duplicates);
    }

    #[test]
    fn test_parse_partial_config_overrides_only_named_fields() {
        let toml = indoc! {r#"
            max_path_length = 2047
            critical_paths = ["C:\\Windows\\system32"]

            [behavior]
            preserve_order = true
        "#};
        let schema = parse_config(toml).unwrap();
        assert_eq!(schema.max_path_length, 2047);
        assert_eq!(schema.critical_paths.len(), 1);
        assert!(schema.behavior.preserve_order);
        // Unnamed flags keep their defaults.
        assert!(schema.behavior.remove_nonexistent);
    }

    #[test]
    fn test_parse_tool_and_issue_tables() {
        let toml = indoc! {r#"
            [tools]
            deno = ["deno.exe"]

            [known_issues]
            scoop-shims = "\\\\scoop\\\\shims"
        "#};
        let schema = parse_config(toml).unwrap();
        assert_eq!(schema.tools["deno"], vec!["deno.exe".to_string()]);
        assert!(schema.known_issues.contains_key("scoop-shims"));
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(parse_config("max_path_length = ").is_err());
    }

    #[test]
    fn test_directory_ancestors_respects_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(dirs.len(), 3);
        assert_eq!(dirs[0], PathBuf::from("/a/b/c/d"));
        assert_eq!(dirs[2], PathBuf::from("/a/b"));
    }

    #[test]
    fn test_load_config_from_path_rejects_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "ignore_patterns = [\"[unclosed\"]").unwrap();
        assert!(load_config_from_path(&path).is_err());
    }

    #[test]
    fn test_load_config_from_path_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "max_path_length = 4096").unwrap();
        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.max_path_length, 4096);
    }
}
