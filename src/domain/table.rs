//! The closed set of tables the admin operates on.

use std::fmt;

/// Tables exposed when the configuration does not list any.
pub const DEFAULT_TABLES: [&str; 5] =
    ["Traders", "Stocks", "Portfolio", "Transactions", "Watchlists"];

/// A table name that has been resolved against an [`AllowList`].
///
/// The inner String is private: the only way to obtain a `TableName` is
/// [`AllowList::resolve`] (or iterating the list), so any value of this type
/// is safe to place in identifier position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Get the table name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Immutable allow-list of table names, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    tables: Vec<TableName>,
}

impl AllowList {
    /// Build an allow-list, keeping first-seen order and dropping duplicates.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tables: Vec<TableName> = Vec::new();
        for name in names {
            let name = TableName(name.into());
            if !tables.contains(&name) {
                tables.push(name);
            }
        }
        Self { tables }
    }

    /// Resolve a requested name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&TableName> {
        self.tables.iter().find(|table| table.as_str() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableName> {
        self.tables.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(DEFAULT_TABLES)
    }
}
