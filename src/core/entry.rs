use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification bucket for a PATH entry. Each category maps to a
/// base priority in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    WindowsSystem,
    PowerShell,
    ProgramFiles,
    WindowsApps,
    DevTools,
    Languages,
    LocalApps,
    Unknown,
}

impl Category {
    /// All categories in declaration order. Used when building priority tables.
    pub fn all() -> [Category; 8] {
        [
            Category::WindowsSystem,
            Category::PowerShell,
            Category::ProgramFiles,
            Category::WindowsApps,
            Category::DevTools,
            Category::Languages,
            Category::LocalApps,
            Category::Unknown,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::WindowsSystem => "WindowsSystem",
            Category::PowerShell => "PowerShell",
            Category::ProgramFiles => "ProgramFiles",
            Category::WindowsApps => "WindowsApps",
            Category::DevTools => "DevTools",
            Category::Languages => "Languages",
            Category::LocalApps => "LocalApps",
            Category::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

/// Which of the two independently stored PATH lists an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    User,
    System,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::User => write!(f, "user"),
            Scope::System => write!(f, "system"),
        }
    }
}

/// A single PATH entry as supplied by the caller.
///
/// `raw` keeps the first-seen casing for display and output. `key` is the
/// normalized identity used for de-duplication and diffing: trimmed, outer
/// quotes stripped, trailing backslashes stripped, lower-cased, with the
/// separator re-added for bare drive roots so `C:` and `C:\` compare equal.
///
/// `category` and `score` start at their defaults and are filled in during
/// scoring; nothing outside the scoring pass writes them.
#[derive(Debug, Clone, Serialize)]
pub struct PathEntry {
    pub raw: String,
    pub key: String,
    pub category: Category,
    pub score: i64,
}

impl PathEntry {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let key = normalized_key(&raw);
        Self {
            raw,
            key,
            category: Category::Unknown,
            score: 0,
        }
    }

    /// The path to hand to filesystem probes: trimmed and unquoted but with
    /// the original casing intact.
    pub fn probe_path(&self) -> &str {
        strip_outer_quotes(self.raw.trim())
    }
}

/// Derives the normalized de-duplication key for a raw PATH entry.
pub fn normalized_key(raw: &str) -> String {
    let cleaned = strip_outer_quotes(raw.trim());
    let mut key = cleaned.trim_end_matches('\\').to_lowercase();
    if is_bare_drive_root(&key) {
        key.push('\\');
    }
    key
}

/// Strips one pair of enclosing double quotes, if present.
pub fn strip_outer_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn is_bare_drive_root(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_lowercase() && bytes[1] == b':'
}
