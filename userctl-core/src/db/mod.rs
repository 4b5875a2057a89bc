//! Database layer - connection pool, schema bootstrap, user repository
//!
//! # Design Principles
//!
//! - Connection pool with a small explicit cap - no shared global client
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Key-based mutations use RETURNING so a miss is observable

pub mod pool;
pub mod schema;
pub mod users;

pub use pool::{create_pool, create_pool_with_options};
pub use schema::ensure_schema;
pub use users::UserRepo;
