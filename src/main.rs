use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use tradedesk::adapter::inbound::cli::{self, command::Cli};
use tradedesk::infrastructure::config::settings::Config;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    config.init_logging();
    info!(config = %cli.config.display(), "tradedesk starting");

    cli::run(&cli, &config)
        .await
        .inspect_err(|e| error!(error = %e, "fatal error"))?;

    info!("tradedesk stopped");
    Ok(())
}
