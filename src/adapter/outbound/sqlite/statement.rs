//! SQL statement builder for introspected tables.
//!
//! Identifiers placed in SQL text come only from a [`TableName`] (resolved
//! against the allow-list) or from a [`ColumnSchema`] / [`Assignment`]
//! (introspected from the database). Values are never formatted into the
//! text; they travel in [`Statement::binds`].
//!
//! Rows are projected through `json_array(...)` so a table of any shape
//! comes back as one text column that decodes to a JSON array in schema
//! order.

use crate::domain::{Assignment, ColumnSchema, TableName, TableSchema};

/// SQL text plus positional bind values, all bound as TEXT.
///
/// SQLite applies column affinity on write and comparison, so a numeric
/// string lands in an INTEGER or REAL column as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<String>,
}

/// Quote an identifier for SQLite, doubling embedded quotes.
#[must_use]
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

impl Statement {
    fn new(sql: String) -> Self {
        Self {
            sql,
            binds: Vec::new(),
        }
    }

    fn bind(mut self, value: impl Into<String>) -> Self {
        self.binds.push(value.into());
        self
    }

    /// `SELECT COUNT(*) AS count FROM table`
    #[must_use]
    pub fn count(table: &TableName) -> Self {
        Self::new(format!("SELECT COUNT(*) AS count FROM {}", quote_ident(table.as_str())))
    }

    /// Column metadata. The table name is bound, not interpolated.
    #[must_use]
    pub fn table_info(table: &TableName) -> Self {
        Self::new(
            "SELECT cid AS position, name, \"type\" AS declared_type, \"notnull\" AS not_null, \
             dflt_value AS default_value, pk AS key_index \
             FROM pragma_table_info(?) ORDER BY cid"
                .to_string(),
        )
        .bind(table.as_str())
    }

    /// Every row as a `json_array` named `record`.
    #[must_use]
    pub fn select_all(table: &TableName, schema: &TableSchema) -> Self {
        Self::new(format!(
            "SELECT {} AS record FROM {}",
            projection(schema),
            quote_ident(table.as_str())
        ))
    }

    /// One row addressed by its key column.
    #[must_use]
    pub fn select_one(
        table: &TableName,
        schema: &TableSchema,
        key: &ColumnSchema,
        id: &str,
    ) -> Self {
        Self::new(format!(
            "SELECT {} AS record FROM {} WHERE {} = ? LIMIT 1",
            projection(schema),
            quote_ident(table.as_str()),
            quote_ident(&key.name)
        ))
        .bind(id)
    }

    /// `INSERT`; with no assignments every column takes its default.
    #[must_use]
    pub fn insert(table: &TableName, values: &[Assignment]) -> Self {
        let table = quote_ident(table.as_str());
        if values.is_empty() {
            return Self::new(format!("INSERT INTO {table} DEFAULT VALUES"));
        }

        let columns: Vec<String> = values.iter().map(|a| quote_ident(a.column())).collect();
        let placeholders = vec!["?"; values.len()].join(", ");
        let mut statement = Self::new(format!(
            "INSERT INTO {table} ({}) VALUES ({placeholders})",
            columns.join(", ")
        ));
        statement.binds = values.iter().map(|a| a.value().to_string()).collect();
        statement
    }

    /// `UPDATE ... SET ... WHERE key = ?`. The key value is the last bind.
    #[must_use]
    pub fn update(table: &TableName, values: &[Assignment], key: &ColumnSchema, id: &str) -> Self {
        let set: Vec<String> = values
            .iter()
            .map(|a| format!("{} = ?", quote_ident(a.column())))
            .collect();
        let mut statement = Self::new(format!(
            "UPDATE {} SET {} WHERE {} = ?",
            quote_ident(table.as_str()),
            set.join(", "),
            quote_ident(&key.name)
        ));
        statement.binds = values.iter().map(|a| a.value().to_string()).collect();
        statement.bind(id)
    }

    /// `DELETE ... WHERE key = ?`
    #[must_use]
    pub fn delete(table: &TableName, key: &ColumnSchema, id: &str) -> Self {
        Self::new(format!(
            "DELETE FROM {} WHERE {} = ?",
            quote_ident(table.as_str()),
            quote_ident(&key.name)
        ))
        .bind(id)
    }
}

/// `json_array` over every column. JSON cannot hold BLOBs, so blob cells are
/// projected as their hex text.
fn projection(schema: &TableSchema) -> String {
    let columns: Vec<String> = schema
        .columns()
        .iter()
        .map(|column| {
            let ident = quote_ident(&column.name);
            format!("CASE WHEN typeof({ident}) = 'blob' THEN hex({ident}) ELSE {ident} END")
        })
        .collect();
    format!("json_array({})", columns.join(", "))
}
