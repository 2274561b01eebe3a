//! CLI module graph.

pub mod command;
pub mod database;
pub mod output;
pub mod serve;

use command::{Cli, Commands};

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Run the parsed command against a loaded configuration.
pub async fn run(cli: &Cli, config: &Config) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    match &cli.command {
        Commands::Serve(args) => serve::execute(args, config).await,
        Commands::InitDb => database::execute_init(config),
        Commands::Check => database::execute_check(&cli.config, config),
    }
}
