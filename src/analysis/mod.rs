//! Classification, scoring and tool detection for PATH entries.
//!
//! The classifier assigns each entry a coarse category from an ordered rule
//! table, the scorer turns a category plus filesystem probes into a numeric
//! priority, and the tool resolver arbitrates between competing installs of
//! the same developer tool. All filesystem access goes through one shared
//! [`DirectoryProbe`](crate::core::DirectoryProbe) so a directory is read at
//! most once per run.

pub mod classifier;
pub mod scorer;
pub mod tools;

pub use classifier::{classify, critical_index};
pub use scorer::{score, score_entries, LTS_MARKER};
pub use tools::{
    detect_tools, resolve_tool_duplicates, tool_duplicate_losers, ToolDetection, ToolProvider,
};
