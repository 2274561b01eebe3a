//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, per-connection pragmas, and the bootstrap
//! schema for SQLite databases.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;

use crate::error::{Error, Result};

/// Bootstrap schema: the admin `user` table plus the trading tables.
pub const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Pool size and pragmas applied to every new connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub max_size: u32,
    pub busy_timeout_ms: u32,
    /// SQLite leaves foreign key enforcement off unless asked per connection.
    pub foreign_keys: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            max_size: 5,
            busy_timeout_ms: 5000,
            foreign_keys: true,
        }
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn, self).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str, options: ConnectionOptions) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(options.max_size)
        .connection_customizer(Box::new(options))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Apply busy timeout and foreign key pragmas.
///
/// # Errors
/// Returns the Diesel error if a pragma fails to apply.
pub fn configure_sqlite_connection(
    conn: &mut SqliteConnection,
    options: &ConnectionOptions,
) -> diesel::QueryResult<()> {
    let foreign_keys = if options.foreign_keys { "ON" } else { "OFF" };
    conn.batch_execute(&format!(
        "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = {foreign_keys};",
        options.busy_timeout_ms
    ))
}

/// Drop and recreate every table in [`SCHEMA_SQL`].
///
/// # Errors
/// Returns an error if a connection cannot be acquired or a statement fails.
pub fn init_schema(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    conn.batch_execute(SCHEMA_SQL)
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(())
}
