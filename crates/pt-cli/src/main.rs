use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pt_cli::calendar::IcalBuddy;
use pt_cli::commands::{projects, show_catalog, sync_config, sync_entries, time_entries};
use pt_cli::ledger::BlockingLedger;
use pt_cli::{Cli, Commands, Config, catalog};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout().lock();
    match command {
        Commands::Projects => {
            let ledger = BlockingLedger::from_config(&config)?;
            let catalog = catalog::load_or_empty(&config.catalog_path);
            projects::run(&mut stdout, &ledger, &catalog)?;
        }
        Commands::TimeEntries { range } => {
            let (from, to) = range.resolve()?;
            let ledger = BlockingLedger::from_config(&config)?;
            time_entries::run(&mut stdout, &ledger, from, to)?;
        }
        Commands::SyncConfig => {
            let ledger = BlockingLedger::from_config(&config)?;
            sync_config::run(&mut stdout, &ledger, &config.catalog_path)?;
        }
        Commands::SyncEntries { range } => {
            let (from, to) = range.resolve()?;
            let ledger = BlockingLedger::from_config(&config)?;
            let calendar = IcalBuddy::new(&config.icalbuddy_path);
            let catalog = catalog::load_or_empty(&config.catalog_path);
            sync_entries::run(&mut stdout, &calendar, &ledger, &catalog, from, to)?;
        }
        Commands::Catalog => {
            let catalog = catalog::load_or_empty(&config.catalog_path);
            show_catalog::run(&mut stdout, &catalog)?;
        }
    }
    stdout.flush()?;

    Ok(())
}
