//! Domain records and query descriptors
//!
//! Records mirror table rows; server-generated fields are `Option` and
//! stay `None` until the store fills them.

pub mod application;
pub mod event_type;
pub mod limiter;
pub mod validation;

pub use application::Application;
pub use event_type::EventType;
pub use limiter::{Limit, Limiter, Sort, SortDirection};
pub use validation::LimiterError;
