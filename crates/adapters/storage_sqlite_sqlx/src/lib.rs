//! # homesim-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `LogStore` port trait defined in `homesim-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Create the `logs` table on startup when it is missing
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `homesim-app` (for port traits) and `homesim-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod log_store;
mod pool;

pub use error::StorageError;
pub use log_store::SqliteLogStore;
pub use pool::{Config, Database};
