//! Application record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A top-level entity owning the event types it emits notifications for.
///
/// `id` and `created` are generated by the store on insert; `updated` is
/// maintained by the store and only ever read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl Application {
    /// A new, not yet persisted application.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            created: None,
            updated: None,
        }
    }
}
