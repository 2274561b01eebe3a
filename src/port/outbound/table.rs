//! Database collaborator contract for the CRUD controller.

use crate::domain::{Assignment, ColumnSchema, Record, TableName, TableSchema};
use crate::error::CrudError;

/// Hands out request-scoped connections.
pub trait TableSource: Send + Sync {
    type Connection: TableConnection;

    /// Acquire a connection for the duration of one operation.
    fn connect(&self) -> Result<Self::Connection, CrudError>;
}

/// Parameterized access to one allow-listed table at a time.
///
/// Implementations only place `TableName` and schema-derived column names in
/// identifier position; every value is a bound parameter. Writes commit
/// before returning, and constraint violations come back as
/// [`CrudError::Integrity`].
pub trait TableConnection {
    /// `SELECT COUNT(*)` over the table.
    fn count(&mut self, table: &TableName) -> Result<i64, CrudError>;

    /// Introspect the table's columns. A missing table yields an empty schema.
    fn schema(&mut self, table: &TableName) -> Result<TableSchema, CrudError>;

    /// Every row, columns in schema order.
    fn fetch_all(
        &mut self,
        table: &TableName,
        schema: &TableSchema,
    ) -> Result<Vec<Record>, CrudError>;

    /// The row whose `key` column equals `id`.
    fn fetch_one(
        &mut self,
        table: &TableName,
        schema: &TableSchema,
        key: &ColumnSchema,
        id: &str,
    ) -> Result<Option<Record>, CrudError>;

    /// Insert one row; omitted columns take their database default.
    fn insert(&mut self, table: &TableName, values: &[Assignment]) -> Result<(), CrudError>;

    /// Update the row addressed by `key = id`. Returns rows affected.
    fn update(
        &mut self,
        table: &TableName,
        values: &[Assignment],
        key: &ColumnSchema,
        id: &str,
    ) -> Result<usize, CrudError>;

    /// Delete the row addressed by `key = id`. Returns rows affected.
    fn delete(
        &mut self,
        table: &TableName,
        key: &ColumnSchema,
        id: &str,
    ) -> Result<usize, CrudError>;
}
