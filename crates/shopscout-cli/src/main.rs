//! ShopScout CLI
//!
//! Natural-language product and store search.

use anyhow::Result;
use clap::Parser;
use shopscout_core::{Config, ShopScoutError};

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        let code = match e.downcast_ref::<ShopScoutError>() {
            Some(err) => err.exit_code(),
            None => shopscout_core::error::exit_codes::GENERAL_ERROR,
        };
        std::process::exit(code);
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Search(args) => commands::search::run(args, &config, cli.format).await,
        Commands::Similar(args) => commands::similar::run(args, &config, cli.format).await,
        Commands::Extract(args) => commands::extract::run(args, &config, cli.format).await,
        Commands::Plan(args) => commands::plan::run(args, cli.format).await,
    }
}
