use anyhow::Result;
use std::path::PathBuf;

use super::{open_output, read_scope_input, resolve_config};
use crate::filter::FixFocus;
use crate::io::{create_writer, OutputFormat};
use crate::plan::build_plan;

pub struct OptimizeConfig {
    pub user_path: Option<String>,
    pub system_path: Option<String>,
    pub path_file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub fix: FixFocus,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Builds an optimization plan for the acquired scopes and writes it.
/// Proposal only; nothing is applied to the environment.
pub fn handle_optimize(cmd: OptimizeConfig) -> Result<()> {
    let config = resolve_config(cmd.config.as_deref())?;
    let input = read_scope_input(cmd.user_path, cmd.system_path, cmd.path_file.as_deref())?;
    log::debug!(
        "planning with focus {:?} over {} user and {} system entries",
        cmd.fix,
        input.user.len(),
        input.system.len()
    );

    let plan = build_plan(&input.user, &input.system, &config, cmd.fix);

    let out = open_output(cmd.output.as_ref())?;
    let mut writer = create_writer(cmd.format, out);
    writer.write_plan(&plan)
}
