use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::filter::FixFocus;
use crate::io::OutputFormat as IoFormat;

#[derive(Parser, Debug)]
#[command(name = "pathtidy")]
#[command(about = "PATH environment variable analyzer and cleanup planner", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate PATH entries and report diagnostics without changing anything
    Analyze {
        /// Raw user-scope PATH string (';'-separated)
        #[arg(long = "user-path")]
        user_path: Option<String>,

        /// Raw system-scope PATH string (';'-separated)
        #[arg(long = "system-path")]
        system_path: Option<String>,

        /// File holding the scopes: first line user, second line system
        #[arg(long = "path-file")]
        path_file: Option<PathBuf>,

        /// Config file (defaults to discovering pathtidy.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Propose a cleaned, de-duplicated, reordered PATH for both scopes
    Optimize {
        /// Raw user-scope PATH string (';'-separated)
        #[arg(long = "user-path")]
        user_path: Option<String>,

        /// Raw system-scope PATH string (';'-separated)
        #[arg(long = "system-path")]
        system_path: Option<String>,

        /// File holding the scopes: first line user, second line system
        #[arg(long = "path-file")]
        path_file: Option<PathBuf>,

        /// Config file (defaults to discovering pathtidy.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Which cleanup stages to apply
        #[arg(long = "fix", value_enum, default_value = "all")]
        fix: FixArg,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl From<OutputFormat> for IoFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => IoFormat::Terminal,
            OutputFormat::Json => IoFormat::Json,
        }
    }
}

/// CLI spelling of the fix focus.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FixArg {
    /// Remove duplicate and empty entries
    Duplicates,
    /// Reorder entries by priority
    Ordering,
    /// Remove entries that no longer exist
    Nonexistent,
    /// Resolve duplicate tool installs and known-issue paths
    ToolSpecific,
    /// Everything
    All,
}

impl From<FixArg> for FixFocus {
    fn from(fix: FixArg) -> Self {
        match fix {
            FixArg::Duplicates => FixFocus::Duplicates,
            FixArg::Ordering => FixFocus::Ordering,
            FixArg::Nonexistent => FixFocus::NonExistent,
            FixArg::ToolSpecific => FixFocus::ToolSpecific,
            FixArg::All => FixFocus::All,
        }
    }
}
