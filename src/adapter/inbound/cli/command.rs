//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Web admin for the trading database
#[derive(Parser, Debug)]
#[command(name = "tradedesk")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the web admin (foreground)
    Serve(ServeArgs),

    /// Create the database tables, dropping any existing ones
    InitDb,

    /// Verify the allow-listed tables and print their schemas
    Check,
}

/// Arguments for `tradedesk serve`.
#[derive(clap::Args, Debug, Default)]
pub struct ServeArgs {
    /// Listen address, overriding `server.bind`
    #[arg(long)]
    pub bind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_with_bind_override() {
        let cli = Cli::try_parse_from(["tradedesk", "serve", "--bind", "0.0.0.0:8000"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8000")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["tradedesk", "init-db", "--config", "/etc/td.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::InitDb));
        assert_eq!(cli.config, PathBuf::from("/etc/td.toml"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["tradedesk"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
