//! userctl-core: data-access layer for a relational user store
//!
//! Provides the contract the `userctl` binary runs its CRUD sequence
//! against: domain models validated at construction, a typed error
//! taxonomy, connection pooling, schema bootstrap, and a repository
//! with one method per store operation.

pub mod db;
pub mod error;
pub mod models;

pub use db::{create_pool, create_pool_with_options, ensure_schema, UserRepo};
pub use error::{StoreError, StoreResult};
pub use models::{Email, NewUser, User, UserChanges, UserSummary, ValidationError};
