//! SQLite persistence adapters.
//!
//! Provides the pooled connection provider, the dynamic statement builder,
//! and Diesel-backed implementations of the table and user stores.

pub mod database;
pub mod statement;
pub mod table;
pub mod user;

pub use database::connection::{create_pool, init_schema, ConnectionOptions, DbPool};
pub use table::{SqliteTableConnection, SqliteTables};
pub use user::SqliteUserStore;
