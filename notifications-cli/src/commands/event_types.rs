//! `notifctl event-type` - event types and their application links

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use uuid::Uuid;

use notifications_db::{ApplicationRepo, EventType, EventTypeQuery, Limiter};

use super::{print_json, print_ndjson};

#[derive(Parser, Debug)]
pub struct EventTypeArgs {
    #[command(subcommand)]
    pub command: EventTypeCommands,
}

#[derive(Subcommand, Debug)]
pub enum EventTypeCommands {
    /// Create an event type and link it to an application
    Add {
        /// Owning application id (UUID)
        application_id: Uuid,

        /// Event type name
        #[arg(long)]
        name: String,

        /// Human-readable description
        #[arg(long)]
        description: String,
    },
    /// List the event types of one application as NDJSON
    List {
        /// Application id (UUID)
        application_id: Uuid,
    },
    /// Query event types with their application, sorted and paged
    Query(QueryArgs),
}

#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Only event types of this application
    #[arg(long = "app")]
    pub application_id: Option<Uuid>,

    /// Rows per page (0 = unlimited)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Page number, starting at 0
    #[arg(long, requires = "page_size")]
    pub page_number: Option<u32>,

    /// Sort column with optional direction, e.g. et_name:desc
    #[arg(long)]
    pub sort_by: Option<String>,
}

impl QueryArgs {
    fn limiter(&self) -> Result<Limiter> {
        Limiter::from_params(self.page_size, self.page_number, self.sort_by.as_deref())
            .context("Invalid paging or sort options")
    }
}

/// Zero-rows link report; the event type row itself was already inserted.
fn unlinked_message(application_id: Uuid) -> String {
    format!(
        "link not created: inserting the link to application {} affected no rows; \
         the event type row was inserted and is left unlinked (see the warn log for its id)",
        application_id
    )
}

pub async fn run_event_type(pool: &PgPool, args: EventTypeArgs) -> Result<()> {
    let repo = ApplicationRepo::new(pool);

    match args.command {
        EventTypeCommands::Add {
            application_id,
            name,
            description,
        } => {
            let added = repo
                .add_event_type_to_application(application_id, EventType::new(name, description))
                .await
                .context("Failed to add event type")?;

            match added {
                Some(event_type) => print_json(&event_type),
                None => bail!(unlinked_message(application_id)),
            }
        }
        EventTypeCommands::List { application_id } => {
            let count = print_ndjson(repo.get_event_types(application_id)).await?;
            tracing::debug!(count, %application_id, "listed event types");
            Ok(())
        }
        EventTypeCommands::Query(query_args) => {
            let query = EventTypeQuery::new(&query_args.limiter()?, query_args.application_id);
            let count = print_ndjson(repo.get_event_types_limited(&query)).await?;
            tracing::debug!(count, "queried event types");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_args_build_limiter() {
        let args = QueryArgs {
            application_id: None,
            page_size: Some(10),
            page_number: Some(2),
            sort_by: Some("et_name:desc".into()),
        };
        let limiter = args.limiter().unwrap();
        assert_eq!(
            limiter.modified_query("SELECT 1"),
            "SELECT 1 ORDER BY et_name DESC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn unlinked_message_names_application() {
        let id = Uuid::new_v4();
        let message = unlinked_message(id);
        assert!(message.starts_with("link not created"));
        assert!(message.contains(&id.to_string()));
        assert!(message.contains("left unlinked"));
    }

    #[test]
    fn query_args_reject_bad_sort() {
        let args = QueryArgs {
            application_id: None,
            page_size: None,
            page_number: None,
            sort_by: Some("name;--".into()),
        };
        assert!(args.limiter().is_err());
    }
}
