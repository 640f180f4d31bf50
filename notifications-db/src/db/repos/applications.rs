//! Application repository
//!
//! CRUD over `applications`, `event_type` and their link table:
//! - writes acquire one pooled connection for the whole call
//! - reads return lazy row streams that hold a connection until dropped
//! - insert + link is two statements on one connection, without a
//!   transaction

use futures::stream::{BoxStream, StreamExt};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::sql::{self, EventTypeQuery};
use crate::error::DbError;
use crate::models::{Application, EventType};

/// Application repository
#[derive(Debug, Clone, Copy)]
pub struct ApplicationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ApplicationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an application, filling in its generated `id` and `created`.
    ///
    /// Constraint violations (e.g. a duplicate name) surface as
    /// [`DbError::Sqlx`].
    #[tracing::instrument(skip(self, app), fields(name = %app.name))]
    pub async fn create_application(&self, mut app: Application) -> Result<Application, DbError> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query(sql::INSERT_APPLICATION)
            .bind(&app.name)
            .bind(&app.description)
            .fetch_one(&mut *conn)
            .await?;

        app.id = Some(row.try_get("id")?);
        app.created = Some(row.try_get("created")?);

        tracing::debug!(id = ?app.id, "application created");
        Ok(app)
    }

    /// Insert an event type and link it to `application_id`.
    ///
    /// Returns `Ok(None)` when the link insert affected no rows. The event
    /// type row is not rolled back in that case, nor when the link insert
    /// fails: it stays in `event_type` without a link.
    #[tracing::instrument(skip(self, event_type), fields(name = %event_type.name))]
    pub async fn add_event_type_to_application(
        &self,
        application_id: Uuid,
        mut event_type: EventType,
    ) -> Result<Option<EventType>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let id = sqlx::query_scalar::<_, i32>(sql::INSERT_EVENT_TYPE)
            .bind(&event_type.name)
            .bind(&event_type.description)
            .fetch_one(&mut *conn)
            .await?;
        event_type.id = Some(id);

        let linked = sqlx::query(sql::LINK_EVENT_TYPE)
            .bind(application_id)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::warn!(event_type_id = id, error = %e, "link insert failed, event type left unlinked");
                e
            })?
            .rows_affected();

        if linked == 0 {
            tracing::warn!(event_type_id = id, "link insert affected no rows, event type left unlinked");
            return Ok(None);
        }

        tracing::debug!(event_type_id = id, "event type linked");
        Ok(Some(event_type))
    }

    /// Stream all applications in table scan order.
    pub fn get_applications(&self) -> BoxStream<'a, Result<Application, DbError>> {
        tracing::debug!("streaming applications");
        sqlx::query_as::<_, Application>(sql::APPLICATION_QUERY)
            .fetch(self.pool)
            .map(|row| row.map_err(DbError::from))
            .boxed()
    }

    /// Look up one application; `Ok(None)` when no row matches.
    #[tracing::instrument(skip(self))]
    pub async fn get_application(&self, application_id: Uuid) -> Result<Option<Application>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let app = sqlx::query_as::<_, Application>(sql::APPLICATION_BY_ID_QUERY)
            .bind(application_id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(app)
    }

    /// Stream the event types linked to an application.
    ///
    /// The `application` back-reference is left empty.
    pub fn get_event_types(&self, application_id: Uuid) -> BoxStream<'a, Result<EventType, DbError>> {
        tracing::debug!(%application_id, "streaming event types");
        sqlx::query(sql::EVENT_TYPES_FOR_APPLICATION)
            .bind(application_id)
            .fetch(self.pool)
            .map(|row| row.and_then(|row| event_type_from_row(&row)).map_err(DbError::from))
            .boxed()
    }

    /// Stream event types with their application, filtered and paged by `query`.
    pub fn get_event_types_limited(
        &self,
        query: &'a EventTypeQuery,
    ) -> BoxStream<'a, Result<EventType, DbError>> {
        tracing::debug!(sql = query.sql(), application_id = ?query.application_id(), "streaming joined event types");

        let mut statement = sqlx::query(query.sql());
        if let Some(application_id) = query.application_id() {
            statement = statement.bind(application_id);
        }

        statement
            .fetch(self.pool)
            .map(|row| row.and_then(|row| joined_event_type_from_row(&row)).map_err(DbError::from))
            .boxed()
    }
}

fn event_type_from_row(row: &PgRow) -> Result<EventType, sqlx::Error> {
    Ok(EventType {
        id: Some(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        application: None,
    })
}

fn joined_event_type_from_row(row: &PgRow) -> Result<EventType, sqlx::Error> {
    let application = Application {
        id: Some(row.try_get("a_id")?),
        name: row.try_get("a_name")?,
        description: row.try_get("a_description")?,
        created: None,
        updated: None,
    };

    Ok(EventType {
        id: Some(row.try_get("et_id")?),
        name: row.try_get("et_name")?,
        description: row.try_get("et_desc")?,
        application: Some(application),
    })
}
