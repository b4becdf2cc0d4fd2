mod core;
mod loader;

pub use core::{
    BehaviorConfig, Config, ConfigError, KnownIssue, PathtidyConfig, ToolPatterns,
    DEFAULT_MAX_PATH_LENGTH,
};
pub use loader::{load_config, load_config_from_path, parse_config, CONFIG_FILE_NAME};
