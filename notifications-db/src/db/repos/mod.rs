//! Repository implementations for database access

pub mod applications;
pub mod sql;

pub use applications::ApplicationRepo;
pub use sql::EventTypeQuery;
