//! Limiter input errors

use thiserror::Error;

/// Invalid paging or sort input handed to a [`Limiter`](super::Limiter)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimiterError {
    #[error("sort column cannot be empty")]
    EmptyColumn,

    /// Sort column is not a plain (optionally qualified) SQL identifier
    #[error("invalid sort column '{column}': expected an identifier like 'name' or 'et.name'")]
    InvalidColumn { column: String },

    #[error("invalid sort direction '{value}': expected 'asc' or 'desc'")]
    InvalidDirection { value: String },

    #[error("page number requires a page size")]
    PageWithoutSize,
}
