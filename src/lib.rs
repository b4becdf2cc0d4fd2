// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod diff;
pub mod filter;
pub mod io;
pub mod order;
pub mod plan;
pub mod validate;

// Re-export commonly used types
pub use crate::core::{normalized_key, Category, DirectoryProbe, PathEntry, Scope};

pub use crate::analysis::{
    classify, detect_tools, resolve_tool_duplicates, score, score_entries, ToolDetection,
    ToolProvider,
};

pub use crate::config::{Config, ConfigError, PathtidyConfig};

pub use crate::diff::diff;
pub use crate::filter::{resolve_fix_types, run_filter_pipeline, FixFocus, FixType, FixTypeSet};
pub use crate::order::order;
pub use crate::plan::{build_plan, OptimizationPlan, ScopePlan};
pub use crate::validate::{validate, validate_scopes, PathIssue, ValidationReport};

pub use crate::io::{create_writer, OutputFormat, OutputWriter};
