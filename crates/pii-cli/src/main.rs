mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use pii_config::Config;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load()?;

    match cli.command {
        cli::Commands::Scan(args) => commands::scan::handle(args, &config),
        cli::Commands::Redact(args) => commands::redact::handle(args, &config),
    }
}
