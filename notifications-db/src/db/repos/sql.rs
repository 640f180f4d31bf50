//! SQL statements and the typed event type query
//!
//! Statement text is part of the external contract and must not drift.

use uuid::Uuid;

use crate::models::Limiter;

pub const INSERT_APPLICATION: &str =
    "INSERT INTO public.applications (name, description) VALUES ($1, $2) RETURNING id, created";

pub const INSERT_EVENT_TYPE: &str =
    "INSERT INTO public.event_type (name, description) VALUES ($1, $2) RETURNING id";

pub const LINK_EVENT_TYPE: &str =
    "INSERT INTO public.application_event_type (application_id, event_type_id) VALUES ($1, $2)";

pub const APPLICATION_QUERY: &str =
    "SELECT a.id, a.name, a.description, a.created, a.updated FROM public.applications a";

pub const APPLICATION_BY_ID_QUERY: &str =
    "SELECT a.id, a.name, a.description, a.created, a.updated FROM public.applications a WHERE id = $1";

pub const EVENT_TYPES_FOR_APPLICATION: &str = "SELECT et.id, et.name, et.description FROM public.event_type et \
     JOIN public.application_event_type aet ON aet.event_type_id = et.id \
     WHERE aet.application_id = $1";

/// Three-way join with aliased columns; row mapping depends on the aliases.
pub const EVENT_TYPE_JOIN_QUERY: &str = "SELECT et.id AS et_id, et.name AS et_name, et.description AS et_desc, \
     a.id AS a_id, a.name AS a_name, a.description as a_description FROM public.event_type et \
     JOIN public.application_event_type aet ON aet.event_type_id = et.id \
     JOIN public.applications a ON a.id = aet.application_id";

const APPLICATION_FILTER: &str = " WHERE a.id = $1";

/// Rendered event type join query: limiter clauses plus an optional
/// application filter bound as `$1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTypeQuery {
    sql: String,
    application_id: Option<Uuid>,
}

impl EventTypeQuery {
    /// Event types joined to `application_id` (or to any application when
    /// `None`), sorted and paged by `limiter`.
    pub fn new(limiter: &Limiter, application_id: Option<Uuid>) -> Self {
        let base = match application_id {
            Some(_) => format!("{}{}", EVENT_TYPE_JOIN_QUERY, APPLICATION_FILTER),
            None => EVENT_TYPE_JOIN_QUERY.to_owned(),
        };

        Self {
            sql: limiter.modified_query(&base),
            application_id,
        }
    }

    /// Event types across all applications.
    pub fn all(limiter: &Limiter) -> Self {
        Self::new(limiter, None)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Value bound to `$1`, if any.
    pub fn application_id(&self) -> Option<Uuid> {
        self.application_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Limit, Sort};

    #[test]
    fn statements_are_exact() {
        assert_eq!(
            EVENT_TYPES_FOR_APPLICATION,
            "SELECT et.id, et.name, et.description FROM public.event_type et JOIN public.application_event_type aet ON aet.event_type_id = et.id WHERE aet.application_id = $1"
        );
        assert_eq!(
            EVENT_TYPE_JOIN_QUERY,
            "SELECT et.id AS et_id, et.name AS et_name, et.description AS et_desc, a.id AS a_id, a.name AS a_name, a.description as a_description FROM public.event_type et JOIN public.application_event_type aet ON aet.event_type_id = et.id JOIN public.applications a ON a.id = aet.application_id"
        );
        assert!(APPLICATION_BY_ID_QUERY.starts_with(APPLICATION_QUERY));
        assert!(APPLICATION_BY_ID_QUERY.ends_with(" WHERE id = $1"));
    }

    #[test]
    fn query_without_application_has_no_filter_or_binding() {
        let query = EventTypeQuery::all(&Limiter::none());
        assert_eq!(query.sql(), EVENT_TYPE_JOIN_QUERY);
        assert_eq!(query.application_id(), None);
        assert!(!query.sql().contains("$1"));
    }

    #[test]
    fn application_filter_precedes_limiter_clauses() {
        let id = Uuid::new_v4();
        let limiter = Limiter::none()
            .with_limit(Limit::new(1, 0))
            .with_sort(Sort::parse("et_name").unwrap());
        let query = EventTypeQuery::new(&limiter, Some(id));

        assert_eq!(query.application_id(), Some(id));
        assert_eq!(
            query.sql(),
            format!(
                "{} WHERE a.id = $1 ORDER BY et_name ASC LIMIT 1 OFFSET 0",
                EVENT_TYPE_JOIN_QUERY
            )
        );
    }
}
