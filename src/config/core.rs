use glob::Pattern;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::Category;

/// Root configuration structure for pathtidy, as written in `pathtidy.toml`.
///
/// Patterns are held as raw strings here; `compile` turns them into the
/// validated runtime [`Config`] the engine consumes. Missing sections fall
/// back to the built-in defaults, which mirror a stock Windows install.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathtidyConfig {
    /// Critical path substrings in pin-priority order. Entries matching one
    /// of these are never removed and lead the system scope after ordering.
    pub critical_paths: Vec<String>,

    /// Regexes for transient directories that should be dropped outright.
    pub ignore_patterns: Vec<String>,

    /// Tool name -> executable-name globs used for tool detection.
    pub tools: BTreeMap<String, Vec<String>>,

    /// Known-issue name -> regex for path shapes with a diagnosed problem.
    pub known_issues: BTreeMap<String, String>,

    /// Base priority per category.
    pub priorities: BTreeMap<Category, i64>,

    /// Maximum combined length of both scope strings.
    pub max_path_length: usize,

    /// Behavior flags.
    pub behavior: BehaviorConfig,
}

impl Default for PathtidyConfig {
    fn default() -> Self {
        Self {
            critical_paths: default_critical_paths(),
            ignore_patterns: default_ignore_patterns(),
            tools: default_tools(),
            known_issues: default_known_issues(),
            priorities: default_priorities(),
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            behavior: BehaviorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub remove_empty_paths: bool,
    pub remove_duplicates: bool,
    pub remove_nonexistent: bool,
    pub preserve_order: bool,
    pub optimize_order: bool,
    pub separate_user_system: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            remove_empty_paths: true,
            remove_duplicates: true,
            remove_nonexistent: true,
            preserve_order: false,
            optimize_order: true,
            separate_user_system: true,
        }
    }
}

pub const DEFAULT_MAX_PATH_LENGTH: usize = 8191;

fn default_critical_paths() -> Vec<String> {
    [
        "C:\\Windows\\system32",
        "C:\\Windows",
        "C:\\Windows\\System32\\Wbem",
        "C:\\Windows\\System32\\WindowsPowerShell\\v1.0",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_ignore_patterns() -> Vec<String> {
    [
        r"\\Temp\\",
        r"\\AppData\\Local\\Temp",
        r"\\\$Recycle\.Bin\\",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_tools() -> BTreeMap<String, Vec<String>> {
    let entries: [(&str, &[&str]); 7] = [
        ("git", &["git.exe"]),
        ("go", &["go.exe"]),
        ("java", &["java.exe", "javac.exe"]),
        ("node", &["node.exe", "npm.cmd"]),
        ("python", &["python.exe", "python*.exe"]),
        ("ruby", &["ruby.exe"]),
        ("rust", &["cargo.exe", "rustc.exe"]),
    ];
    entries
        .iter()
        .map(|(tool, patterns)| {
            (
                tool.to_string(),
                patterns.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect()
}

fn default_known_issues() -> BTreeMap<String, String> {
    [
        ("msys-shell-duplicates", r"\\(msys64|mingw(32|64)|cygwin(64)?)\\"),
        ("nested-node-modules", r"\\node_modules\\"),
        ("installer-leftovers", r"\\Temp\\[^\\]*install"),
    ]
    .iter()
    .map(|(name, pattern)| (name.to_string(), pattern.to_string()))
    .collect()
}

fn default_priorities() -> BTreeMap<Category, i64> {
    [
        (Category::WindowsSystem, 100),
        (Category::PowerShell, 90),
        (Category::ProgramFiles, 80),
        (Category::WindowsApps, 70),
        (Category::DevTools, 60),
        (Category::Languages, 50),
        (Category::LocalApps, 40),
        (Category::Unknown, 10),
    ]
    .into_iter()
    .collect()
}

/// Configuration errors surfaced at load time. The engine itself assumes a
/// structurally valid [`Config`] and never re-validates.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid ignore pattern `{pattern}`: {source}")]
    InvalidIgnorePattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("invalid known-issue pattern `{name}`: {source}")]
    InvalidIssuePattern { name: String, source: regex::Error },

    #[error("invalid executable pattern `{pattern}` for tool `{tool}`: {source}")]
    InvalidToolPattern {
        tool: String,
        pattern: String,
        source: glob::PatternError,
    },
}

/// A named known-issue regex.
#[derive(Debug, Clone)]
pub struct KnownIssue {
    pub name: String,
    pub pattern: Regex,
}

/// Executable-name globs for one configured tool.
#[derive(Debug, Clone)]
pub struct ToolPatterns {
    pub name: String,
    pub patterns: Vec<Pattern>,
}

/// Validated, immutable runtime configuration.
///
/// Built once from a [`PathtidyConfig`] and passed by reference everywhere;
/// no component mutates it after construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub critical_paths: Vec<String>,
    pub ignore_patterns: Vec<Regex>,
    pub tools: Vec<ToolPatterns>,
    pub known_issues: Vec<KnownIssue>,
    pub priorities: BTreeMap<Category, i64>,
    pub max_path_length: usize,
    pub remove_empty_paths: bool,
    pub remove_duplicates: bool,
    pub remove_nonexistent: bool,
    pub preserve_order: bool,
    pub optimize_order: bool,
    pub separate_user_system: bool,
}

impl Config {
    pub fn base_priority(&self, category: Category) -> i64 {
        self.priorities.get(&category).copied().unwrap_or(0)
    }
}

impl Default for Config {
    fn default() -> Self {
        // The built-in pattern set is known-good; a failure here is a defect
        // in the defaults themselves.
        PathtidyConfig::default()
            .compile()
            .expect("built-in default configuration compiles")
    }
}

impl PathtidyConfig {
    /// Compiles raw pattern strings into the runtime [`Config`], surfacing
    /// the first invalid pattern as an error. Path matching on Windows is
    /// case-insensitive, so every regex is compiled that way.
    pub fn compile(self) -> Result<Config, ConfigError> {
        let ignore_patterns = self
            .ignore_patterns
            .into_iter()
            .map(|pattern| {
                compile_ci(&pattern).map_err(|source| ConfigError::InvalidIgnorePattern {
                    pattern,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let known_issues = self
            .known_issues
            .into_iter()
            .map(|(name, pattern)| {
                compile_ci(&pattern)
                    .map(|pattern| KnownIssue {
                        name: name.clone(),
                        pattern,
                    })
                    .map_err(|source| ConfigError::InvalidIssuePattern { name, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tools = self
            .tools
            .into_iter()
            .map(|(name, patterns)| {
                let patterns = patterns
                    .into_iter()
                    .map(|pattern| {
                        Pattern::new(&pattern.to_lowercase()).map_err(|source| {
                            ConfigError::InvalidToolPattern {
                                tool: name.clone(),
                                pattern,
                                source,
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ToolPatterns { name, patterns })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Config {
            critical_paths: self.critical_paths,
            ignore_patterns,
            tools,
            known_issues,
            priorities: self.priorities,
            max_path_length: self.max_path_length,
            remove_empty_paths: self.behavior.remove_empty_paths,
            remove_duplicates: self.behavior.remove_duplicates,
            remove_nonexistent: self.behavior.remove_nonexistent,
            preserve_order: self.behavior.preserve_order,
            optimize_order: self.behavior.optimize_order,
            separate_user_system: self.behavior.separate_user_system,
        })
    }
}

fn compile_ci(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}
