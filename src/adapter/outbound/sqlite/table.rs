//! SQLite implementation of the table ports.
//!
//! Statements come from [`Statement`]; this module only executes them on a
//! pooled Diesel connection, decodes `json_array` rows, and maps constraint
//! failures to [`CrudError::Integrity`].

use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{BigInt, Bool, Integer, Nullable, Text};
use diesel::sqlite::Sqlite;

use super::database::connection::DbPool;
use super::statement::Statement;
use crate::domain::{Assignment, ColumnSchema, Record, TableName, TableSchema, Value};
use crate::error::CrudError;
use crate::port::outbound::{TableConnection, TableSource};

/// Pool-backed source of table connections.
#[derive(Clone)]
pub struct SqliteTables {
    pool: DbPool,
}

impl SqliteTables {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl TableSource for SqliteTables {
    type Connection = SqliteTableConnection;

    fn connect(&self) -> Result<SqliteTableConnection, CrudError> {
        let conn = self
            .pool
            .get()
            .map_err(|e| CrudError::Connection(e.to_string()))?;
        Ok(SqliteTableConnection { conn })
    }
}

/// One pooled connection, returned to the pool on drop.
pub struct SqliteTableConnection {
    conn: PooledConnection<ConnectionManager<SqliteConnection>>,
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct ColumnRow {
    #[diesel(sql_type = Integer)]
    position: i32,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    declared_type: String,
    #[diesel(sql_type = Bool)]
    not_null: bool,
    #[diesel(sql_type = Nullable<Text>)]
    default_value: Option<String>,
    #[diesel(sql_type = Integer)]
    key_index: i32,
}

impl From<ColumnRow> for ColumnSchema {
    fn from(row: ColumnRow) -> Self {
        Self {
            position: row.position,
            name: row.name,
            declared_type: row.declared_type,
            not_null: row.not_null,
            default_value: row.default_value,
            primary_key: row.key_index > 0,
        }
    }
}

#[derive(QueryableByName)]
struct RecordRow {
    #[diesel(sql_type = Text)]
    record: String,
}

fn boxed(statement: Statement) -> BoxedSqlQuery<'static, Sqlite, SqlQuery> {
    let mut query = diesel::sql_query(statement.sql).into_boxed::<Sqlite>();
    for value in statement.binds {
        query = query.bind::<Text, _>(value);
    }
    query
}

fn read_error(err: DieselError) -> CrudError {
    CrudError::Database(err.to_string())
}

/// Constraint violations become user-facing integrity errors; anything else
/// is a database fault.
fn write_error(err: DieselError) -> CrudError {
    match err {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation,
            info,
        ) => CrudError::Integrity(info.message().to_string()),
        DieselError::DatabaseError(_, info) if info.message().contains("constraint failed") => {
            CrudError::Integrity(info.message().to_string())
        }
        other => CrudError::Database(other.to_string()),
    }
}

fn decode(row: &RecordRow, columns: &[String]) -> Result<Record, CrudError> {
    let values: Vec<Value> = serde_json::from_str(&row.record)
        .map_err(|e| CrudError::Database(format!("undecodable row: {e}")))?;
    Ok(Record::from_columns(columns, values))
}

impl SqliteTableConnection {
    fn execute_write(&mut self, statement: Statement) -> Result<usize, CrudError> {
        self.conn
            .transaction::<_, DieselError, _>(|conn| boxed(statement).execute(conn))
            .map_err(write_error)
    }
}

impl TableConnection for SqliteTableConnection {
    fn count(&mut self, table: &TableName) -> Result<i64, CrudError> {
        let rows: Vec<CountRow> = boxed(Statement::count(table))
            .load(&mut self.conn)
            .map_err(read_error)?;
        Ok(rows.first().map_or(0, |row| row.count))
    }

    fn schema(&mut self, table: &TableName) -> Result<TableSchema, CrudError> {
        let rows: Vec<ColumnRow> = boxed(Statement::table_info(table))
            .load(&mut self.conn)
            .map_err(read_error)?;
        Ok(TableSchema::new(rows.into_iter().map(ColumnSchema::from).collect()))
    }

    fn fetch_all(
        &mut self,
        table: &TableName,
        schema: &TableSchema,
    ) -> Result<Vec<Record>, CrudError> {
        let rows: Vec<RecordRow> = boxed(Statement::select_all(table, schema))
            .load(&mut self.conn)
            .map_err(read_error)?;
        let columns = schema.column_names();
        rows.iter().map(|row| decode(row, &columns)).collect()
    }

    fn fetch_one(
        &mut self,
        table: &TableName,
        schema: &TableSchema,
        key: &ColumnSchema,
        id: &str,
    ) -> Result<Option<Record>, CrudError> {
        let rows: Vec<RecordRow> = boxed(Statement::select_one(table, schema, key, id))
            .load(&mut self.conn)
            .map_err(read_error)?;
        let columns = schema.column_names();
        rows.first().map(|row| decode(row, &columns)).transpose()
    }

    fn insert(&mut self, table: &TableName, values: &[Assignment]) -> Result<(), CrudError> {
        self.execute_write(Statement::insert(table, values))
            .map(|_| ())
    }

    fn update(
        &mut self,
        table: &TableName,
        values: &[Assignment],
        key: &ColumnSchema,
        id: &str,
    ) -> Result<usize, CrudError> {
        self.execute_write(Statement::update(table, values, key, id))
    }

    fn delete(
        &mut self,
        table: &TableName,
        key: &ColumnSchema,
        id: &str,
    ) -> Result<usize, CrudError> {
        self.execute_write(Statement::delete(table, key, id))
    }
}
