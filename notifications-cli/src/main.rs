//! notifctl - operator CLI for the notifications application store
//!
//! - Applications: create, list, get (`app` subcommand)
//! - Event types: add + link, list per application, paged/sorted query
//!   (`event-type` subcommand)
//! - Schema migrations (`migrate` subcommand or `--migrate`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notifications_db::db::pool::{create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
use tracing::info;

mod commands;
mod config;
mod tracing_setup;

use config::NotifctlConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "notifctl",
    author,
    version,
    about = "Manage notification applications and their event types"
)]
struct Cli {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Config file (default: ~/.notifctl/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Run pending migrations before the command
    #[arg(long, global = true)]
    migrate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply schema migrations and exit
    Migrate,
    /// Application records (create, list, get)
    App(commands::AppArgs),
    /// Event types and their application links (add, list, query)
    EventType(commands::EventTypeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = NotifctlConfig::load(cli.config.as_deref())?;
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        log_level: config.log_level.clone(),
    })
    .ok();

    let database_url = config.resolve_database_url(cli.database_url)?;
    let pool = create_pool_with_options(
        &database_url,
        config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
    )
    .await
    .context("Failed to create database pool")?;

    if cli.migrate || config.run_migrations || matches!(cli.command, Commands::Migrate) {
        notifications_db::migrate(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let result = match cli.command {
        Commands::Migrate => {
            info!("database is up to date");
            Ok(())
        }
        Commands::App(args) => commands::run_app(&pool, args).await,
        Commands::EventType(args) => commands::run_event_type(&pool, args).await,
    };

    pool.close().await;
    result
}
