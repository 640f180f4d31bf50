//! `notifctl app` - application records

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use uuid::Uuid;

use notifications_db::{Application, ApplicationRepo, DbError};

use super::{print_json, print_ndjson};

#[derive(Parser, Debug)]
pub struct AppArgs {
    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Subcommand, Debug)]
pub enum AppCommands {
    /// Create an application and print it with its generated id
    Create {
        /// Application name (unique)
        #[arg(long)]
        name: String,

        /// Human-readable description
        #[arg(long)]
        description: String,
    },
    /// List all applications as NDJSON
    List,
    /// Show a single application
    Get {
        /// Application id (UUID)
        id: Uuid,
    },
}

pub async fn run_app(pool: &PgPool, args: AppArgs) -> Result<()> {
    let repo = ApplicationRepo::new(pool);

    match args.command {
        AppCommands::Create { name, description } => {
            let app = repo
                .create_application(Application::new(name, description))
                .await
                .context("Failed to create application")?;
            tracing::info!(id = ?app.id, "created application");
            print_json(&app)
        }
        AppCommands::List => {
            let count = print_ndjson(repo.get_applications()).await?;
            tracing::debug!(count, "listed applications");
            Ok(())
        }
        AppCommands::Get { id } => {
            let app = repo
                .get_application(id)
                .await?
                .ok_or_else(|| DbError::not_found("application", id))?;
            print_json(&app)
        }
    }
}
