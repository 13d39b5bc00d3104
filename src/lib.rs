//! rOrderDB library root.
//! Exposes the CLI parser, the high-level run() function and the schema /
//! migration modules for programmatic use.

pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cfg).await,
        Commands::Migrate { legacy, json } => {
            cli::commands::migrate::handle(cfg, legacy, *json).await
        }
        Commands::Status { json } => cli::commands::status::handle(cfg, *json).await,
        Commands::Now => cli::commands::now::handle(),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // `now` needs no database at all
    if matches!(cli.command, Commands::Now) {
        return cli::commands::now::handle();
    }

    // 2️⃣ resolve configuration before touching the network
    let cfg = Config::resolve(cli.database_url.as_deref(), cli.schema.as_deref())?;

    // 3️⃣ every store call blocks this thread until it completes
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(dispatch(&cli, &cfg))
}
