//! EventType record

use serde::{Deserialize, Serialize};

use super::Application;

/// A named category of event belonging to one or more applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub id: Option<i32>,
    pub name: String,
    pub description: String,
    /// Application this row was joined to. Only filled by limiter queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
}

impl EventType {
    /// A new, not yet persisted event type.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            application: None,
        }
    }
}
