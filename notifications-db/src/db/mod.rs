//! Database layer - connection pool and repositories
//!
//! - Every call acquires its own pooled connection, released on drop
//! - Reads stream rows lazily from the cursor
//! - No implicit transactions: multi-statement writes run sequentially
//!   on one connection

pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
