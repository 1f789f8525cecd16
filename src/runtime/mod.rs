//! Application lifecycle and execution modes

pub mod lifetime;
pub mod modes;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::config::{StaticConfig, resolve_config};
use crate::system::logging::init_logging;

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let command = cli.command.clone().unwrap_or(Commands::Serve);

    if command == Commands::GenerateConfig {
        print!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    let config = resolve_config(cli.config.as_deref(), &cli.overrides())?;

    match command {
        Commands::Serve => {
            // guard 必须存活到进程结束
            let _guard = init_logging(&config.logging)?;
            let startup = lifetime::prepare_startup(config).await?;
            modes::run_server(startup).await
        }
        other => {
            let startup = lifetime::prepare_startup(config).await?;
            let output = modes::run_cli(other, &startup).await?;
            println!("{}", output);
            Ok(())
        }
    }
}
