use anyhow::Result;
use clap::Parser;
use pathtidy::cli::{Cli, Commands};
use pathtidy::commands::{self, AnalyzeConfig, OptimizeConfig};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            user_path,
            system_path,
            path_file,
            config,
            format,
            output,
        } => commands::handle_analyze(AnalyzeConfig {
            user_path,
            system_path,
            path_file,
            config,
            format: format.into(),
            output,
        }),
        Commands::Optimize {
            user_path,
            system_path,
            path_file,
            config,
            fix,
            format,
            output,
        } => commands::handle_optimize(OptimizeConfig {
            user_path,
            system_path,
            path_file,
            config,
            fix: fix.into(),
            format: format.into(),
            output,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}
