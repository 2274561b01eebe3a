//! Column and table schema descriptions obtained by introspection.

use serde::Serialize;

/// SQLite column affinity, derived from the declared type.
///
/// Follows the rules in "Datatypes In SQLite" section 3.1, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Affinity {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
}

impl Affinity {
    #[must_use]
    pub fn from_declared_type(declared: &str) -> Self {
        let declared = declared.to_ascii_uppercase();
        if declared.contains("INT") {
            Self::Integer
        } else if ["CHAR", "CLOB", "TEXT"].iter().any(|t| declared.contains(t)) {
            Self::Text
        } else if declared.is_empty() || declared.contains("BLOB") {
            Self::Blob
        } else if ["REAL", "FLOA", "DOUB"].iter().any(|t| declared.contains(t)) {
            Self::Real
        } else {
            Self::Numeric
        }
    }
}

/// One column as reported by `pragma_table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    /// Zero-based column position.
    pub position: i32,
    pub name: String,
    /// Type as written in `CREATE TABLE`, possibly empty.
    pub declared_type: String,
    pub not_null: bool,
    /// Default value expression, as SQL text.
    pub default_value: Option<String>,
    pub primary_key: bool,
}

impl ColumnSchema {
    #[must_use]
    pub fn affinity(&self) -> Affinity {
        Affinity::from_declared_type(&self.declared_type)
    }
}

/// Ordered column list of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    columns: Vec<ColumnSchema>,
}

impl TableSchema {
    #[must_use]
    pub fn new(mut columns: Vec<ColumnSchema>) -> Self {
        columns.sort_by_key(|column| column.position);
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|column| column.name == name)
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.name.clone()).collect()
    }

    /// Columns flagged as part of the primary key.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.columns.iter().filter(|column| column.primary_key)
    }

    /// The single addressing column, if the table has exactly one key column.
    ///
    /// Composite keys yield `None` so a row is never addressed by one part of
    /// its key.
    #[must_use]
    pub fn primary_key(&self) -> Option<&ColumnSchema> {
        let mut keys = self.primary_key_columns();
        match (keys.next(), keys.next()) {
            (Some(key), None) => Some(key),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn column(
        position: i32,
        name: &str,
        declared: &str,
        not_null: bool,
        pk: bool,
    ) -> ColumnSchema {
        ColumnSchema {
            position,
            name: name.to_string(),
            declared_type: declared.to_string(),
            not_null,
            default_value: None,
            primary_key: pk,
        }
    }

    pub(crate) fn stocks() -> TableSchema {
        TableSchema::new(vec![
            column(0, "id", "INTEGER", false, true),
            column(1, "symbol", "TEXT", true, false),
            column(2, "name", "TEXT", false, false),
        ])
    }

    #[test]
    fn affinity_rules() {
        assert_eq!(Affinity::from_declared_type("INTEGER"), Affinity::Integer);
        assert_eq!(Affinity::from_declared_type("BIGINT"), Affinity::Integer);
        assert_eq!(Affinity::from_declared_type("VARCHAR(20)"), Affinity::Text);
        assert_eq!(Affinity::from_declared_type(""), Affinity::Blob);
        assert_eq!(Affinity::from_declared_type("double precision"), Affinity::Real);
        assert_eq!(Affinity::from_declared_type("DECIMAL(10,2)"), Affinity::Numeric);
        // "POINT" contains "INT"
        assert_eq!(Affinity::from_declared_type("FLOATING POINT"), Affinity::Integer);
    }

    #[test]
    fn primary_key_found() {
        let schema = stocks();
        assert_eq!(schema.primary_key().map(|c| c.name.as_str()), Some("id"));
        assert_eq!(schema.column_names(), vec!["id", "symbol", "name"]);
    }

    #[test]
    fn composite_key_has_no_addressing_column() {
        let schema = TableSchema::new(vec![
            column(0, "trader_id", "INTEGER", true, true),
            column(1, "stock_id", "INTEGER", true, true),
        ]);
        assert!(schema.primary_key().is_none());
        assert_eq!(schema.primary_key_columns().count(), 2);
    }

    #[test]
    fn no_key() {
        let schema = TableSchema::new(vec![column(0, "note", "TEXT", false, false)]);
        assert!(schema.primary_key().is_none());
    }

    #[test]
    fn columns_sorted_by_position() {
        let schema = TableSchema::new(vec![
            column(1, "b", "TEXT", false, false),
            column(0, "a", "TEXT", false, false),
        ]);
        assert_eq!(schema.column_names(), vec!["a", "b"]);
    }
}
