//! notifications-db: Postgres store for notification applications
//!
//! Exposes the applications / event types / link tables through
//! [`ApplicationRepo`], plus the pool factory, the paging limiter and the
//! embedded schema migrations.

pub mod db;
pub mod error;
pub mod models;

pub use db::{create_pool, create_pool_with_options, ApplicationRepo, EventTypeQuery};
pub use error::{DbError, Result};
pub use models::{Application, EventType, Limit, Limiter, LimiterError, Sort, SortDirection};

/// Schema migrations for the applications and event type tables.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../migrations");

/// Run all pending migrations against the pool.
pub async fn migrate(pool: &sqlx::PgPool) -> Result<()> {
    tracing::info!("Running notifications migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Notifications migrations complete");
    Ok(())
}
