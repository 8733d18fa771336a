//! MedScan CLI - find coded clinical concepts in free text.

use anyhow::Context;
use clap::Parser;
use medscan_cli::commands;
use medscan_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Log to stderr; stdout carries results and protocol lines
    let filter = EnvFilter::try_from_env("MEDSCAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    // Load config
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    // Override terminology source if specified
    if let Some(path) = cli.terminology {
        config.engine.terminology_path = Some(path);
    }

    // Determine output format and color
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        Command::Analyze(args) => commands::execute_analyze(args, &config, &formatter).await?,
        Command::Search(args) => commands::execute_search(args, &config, &formatter).await?,
        Command::Serve => commands::execute_serve(&config).await?,
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await?
        }
    }

    Ok(())
}
