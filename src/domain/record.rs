//! Rows read from, and values written to, a table.

use std::collections::HashMap;

use super::schema::ColumnSchema;

/// A single column value. SQLite rows arrive as JSON scalars.
pub type Value = serde_json::Value;

/// One row, as ordered (column, value) pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Pair column names with values positionally. Extra names or values are
    /// dropped.
    #[must_use]
    pub fn from_columns(names: &[String], values: Vec<Value>) -> Self {
        let fields = names.iter().cloned().zip(values).collect();
        Self { fields }
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Text form of a column value; empty for NULL or an unknown column.
    #[must_use]
    pub fn display(&self, column: &str) -> String {
        self.get(column).map(display_value).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Render a value the way a form field or table cell shows it.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Submitted form values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The submitted value with surrounding whitespace removed; a missing
    /// field reads as empty.
    #[must_use]
    pub fn trimmed(&self, name: &str) -> &str {
        self.get(name).map(str::trim).unwrap_or_default()
    }
}

impl From<HashMap<String, String>> for FormFields {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A value bound to a schema column for INSERT or UPDATE.
///
/// Built from a [`ColumnSchema`] so the column identifier always comes from
/// introspection, never from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    column: String,
    value: String,
}

impl Assignment {
    #[must_use]
    pub fn new(column: &ColumnSchema, value: impl Into<String>) -> Self {
        Self {
            column: column.name.clone(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}
