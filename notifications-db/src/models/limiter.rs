//! Paging and sort limiter
//!
//! A [`Limiter`] rewrites a base SELECT by appending ORDER BY and
//! LIMIT/OFFSET clauses. It never touches the projection, so row mapping
//! stays valid for any limiter.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::LimiterError;

/// Plain or table-qualified identifier, e.g. `name` or `et.name`
static COLUMN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .expect("invalid column regex")
});

/// Largest OFFSET Postgres accepts (bigint)
const MAX_OFFSET: u64 = i64::MAX as u64;

/// LIMIT/OFFSET pair
///
/// A `limit` of 0 renders no LIMIT clause; a non-zero `offset` is still
/// applied. Offsets are capped at `i64::MAX` when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    /// Maximum rows; 0 means unlimited
    pub limit: u32,
    pub offset: u64,
}

impl Limit {
    pub fn new(limit: u32, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Page-based limit with 0-indexed page numbers.
    pub fn from_page(page_size: u32, page_number: u32) -> Self {
        Self {
            limit: page_size,
            offset: u64::from(page_size) * u64::from(page_number),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = LimiterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(LimiterError::InvalidDirection {
                value: s.to_owned(),
            }),
        }
    }
}

/// Validated ORDER BY column and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sort {
    column: String,
    direction: SortDirection,
}

impl Sort {
    /// Create a sort, validating the column identifier.
    pub fn new(column: &str, direction: SortDirection) -> Result<Self, LimiterError> {
        let column = column.trim();
        if column.is_empty() {
            return Err(LimiterError::EmptyColumn);
        }
        if !COLUMN_RE.is_match(column) {
            return Err(LimiterError::InvalidColumn {
                column: column.to_owned(),
            });
        }
        Ok(Self {
            column: column.to_owned(),
            direction,
        })
    }

    /// Parse `column` or `column:asc|desc`.
    ///
    /// # Example
    /// ```
    /// use notifications_db::{Sort, SortDirection};
    ///
    /// let sort = Sort::parse("et.name:desc").unwrap();
    /// assert_eq!(sort.column(), "et.name");
    /// assert_eq!(sort.direction(), SortDirection::Desc);
    /// assert!(Sort::parse("name; DROP TABLE x").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, LimiterError> {
        match s.split_once(':') {
            Some((column, direction)) => Self::new(column, direction.trim().parse()?),
            None => Self::new(s, SortDirection::Asc),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Query limiter: optional sort plus optional paging
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Limiter {
    pub limit: Option<Limit>,
    pub sort: Option<Sort>,
}

impl Limiter {
    /// Limiter that leaves queries untouched.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Build from request-style parameters.
    ///
    /// - `page_number` is 0-indexed and needs a `page_size`
    /// - `sort_by` is `column` or `column:asc|desc`
    pub fn from_params(
        page_size: Option<u32>,
        page_number: Option<u32>,
        sort_by: Option<&str>,
    ) -> Result<Self, LimiterError> {
        let limit = match (page_size, page_number) {
            (Some(size), number) => Some(Limit::from_page(size, number.unwrap_or(0))),
            (None, Some(_)) => return Err(LimiterError::PageWithoutSize),
            (None, None) => None,
        };
        let sort = sort_by.map(Sort::parse).transpose()?;
        Ok(Self { limit, sort })
    }

    /// Rewrite `base` with this limiter's ORDER BY and LIMIT/OFFSET.
    ///
    /// Clauses are appended after whatever WHERE the base query carries.
    pub fn modified_query(&self, base: &str) -> String {
        let mut query = base.to_owned();
        if let Some(sort) = &self.sort {
            // Infallible for String
            let _ = write!(query, " ORDER BY {} {}", sort.column, sort.direction.as_sql());
        }
        match self.limit {
            Some(Limit { limit, offset }) if limit > 0 => {
                let _ = write!(query, " LIMIT {} OFFSET {}", limit, offset.min(MAX_OFFSET));
            }
            Some(Limit { offset, .. }) if offset > 0 => {
                let _ = write!(query, " OFFSET {}", offset.min(MAX_OFFSET));
            }
            _ => {}
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "SELECT et.id FROM public.event_type et";

    #[test]
    fn empty_limiter_keeps_query() {
        assert_eq!(Limiter::none().modified_query(BASE), BASE);
    }

    #[test]
    fn appends_limit_and_offset() {
        let limiter = Limiter::none().with_limit(Limit::new(1, 0));
        assert_eq!(
            limiter.modified_query(BASE),
            "SELECT et.id FROM public.event_type et LIMIT 1 OFFSET 0"
        );
    }

    #[test]
    fn zero_limit_means_unlimited() {
        let limiter = Limiter::none().with_limit(Limit::new(0, 0));
        assert_eq!(limiter.modified_query(BASE), BASE);
    }

    #[test]
    fn zero_limit_keeps_offset() {
        let limiter = Limiter::none().with_limit(Limit::new(0, 40));
        assert_eq!(
            limiter.modified_query(BASE),
            "SELECT et.id FROM public.event_type et OFFSET 40"
        );
    }

    #[test]
    fn offset_capped_at_bigint_max() {
        let limiter = Limiter::none().with_limit(Limit::new(10, u64::MAX));
        assert_eq!(
            limiter.modified_query(BASE),
            format!("{} LIMIT 10 OFFSET {}", BASE, i64::MAX)
        );

        let limiter = Limiter::none().with_limit(Limit::from_page(u32::MAX, u32::MAX));
        assert!(limiter
            .modified_query(BASE)
            .ends_with(&format!("OFFSET {}", i64::MAX)));
    }

    #[test]
    fn sort_goes_before_limit() {
        let limiter = Limiter::none()
            .with_limit(Limit::from_page(10, 2))
            .with_sort(Sort::parse("et_name:DESC").unwrap());
        assert_eq!(
            limiter.modified_query(&format!("{} WHERE a.id = $1", BASE)),
            "SELECT et.id FROM public.event_type et WHERE a.id = $1 ORDER BY et_name DESC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn page_offset_calculation() {
        assert_eq!(Limit::from_page(10, 0).offset, 0);
        assert_eq!(Limit::from_page(10, 1).offset, 10);
        assert_eq!(Limit::from_page(25, 3).offset, 75);
    }

    #[test]
    fn sort_defaults_to_ascending() {
        let sort = Sort::parse("name").unwrap();
        assert_eq!(sort.column(), "name");
        assert_eq!(sort.direction(), SortDirection::Asc);
    }

    #[test]
    fn rejects_injection_in_column() {
        let err = Sort::parse("name; DROP TABLE applications").unwrap_err();
        assert!(matches!(err, LimiterError::InvalidColumn { .. }));

        let err = Sort::parse("a.b.c").unwrap_err();
        assert!(matches!(err, LimiterError::InvalidColumn { .. }));
    }

    #[test]
    fn rejects_bad_direction_and_empty_column() {
        assert!(matches!(
            Sort::parse("name:up").unwrap_err(),
            LimiterError::InvalidDirection { .. }
        ));
        assert_eq!(Sort::parse(":desc").unwrap_err(), LimiterError::EmptyColumn);
    }

    #[test]
    fn from_params() {
        let limiter = Limiter::from_params(Some(5), Some(1), Some("a_name:desc")).unwrap();
        assert_eq!(limiter.limit, Some(Limit::new(5, 5)));
        assert_eq!(limiter.sort.as_ref().map(Sort::column), Some("a_name"));

        let limiter = Limiter::from_params(Some(5), None, None).unwrap();
        assert_eq!(limiter.limit, Some(Limit::new(5, 0)));
        assert!(limiter.sort.is_none());

        assert_eq!(Limiter::from_params(None, None, None).unwrap(), Limiter::none());
        assert_eq!(
            Limiter::from_params(None, Some(2), None).unwrap_err(),
            LimiterError::PageWithoutSize
        );
    }
}
