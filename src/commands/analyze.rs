use anyhow::Result;
use std::path::PathBuf;

use super::{open_output, read_scope_input, resolve_config};
use crate::core::DirectoryProbe;
use crate::io::{create_writer, OutputFormat};
use crate::validate::validate_scopes;

pub struct AnalyzeConfig {
    pub user_path: Option<String>,
    pub system_path: Option<String>,
    pub path_file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Runs the validator over the acquired scopes and writes the report.
pub fn handle_analyze(cmd: AnalyzeConfig) -> Result<()> {
    let config = resolve_config(cmd.config.as_deref())?;
    let input = read_scope_input(cmd.user_path, cmd.system_path, cmd.path_file.as_deref())?;
    log::debug!(
        "validating {} user and {} system entries",
        input.user.len(),
        input.system.len()
    );

    let probe = DirectoryProbe::new();
    let report = validate_scopes(&input.user, &input.system, &config, &probe);

    let out = open_output(cmd.output.as_ref())?;
    let mut writer = create_writer(cmd.format, out);
    writer.write_report(&report)
}
