// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use modkit::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(catalog) = cli.catalog {
        settings.catalog = catalog;
    }
    if cli.ignore_conflicts {
        settings.enforce_conflicts = false;
    }

    match cli.command {
        Commands::List => commands::cmd_list(&settings),
        Commands::Show { package } => commands::cmd_show(&settings, &package),
        Commands::Check => commands::cmd_check(&settings),
        Commands::Plan {
            components,
            execute,
        } => commands::cmd_plan(&settings, &components, execute),
    }
}
