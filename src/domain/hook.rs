//! Per-column field transforms.
//!
//! Business rules that apply to one column of one table (today: storing a
//! trader's password as a one-way hash) are registered here instead of being
//! string-matched inside the controller.

use std::collections::HashMap;

use super::table::TableName;

/// What happens to a submitted value before it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Store a one-way hash of the value. On edit, an empty value leaves the
    /// stored hash untouched.
    Hashed,
}

/// Lookup table of (table, column) rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldHooks {
    rules: HashMap<(String, String), FieldRule>,
}

impl FieldHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks shipped with the trading schema: `Traders.Password` is hashed.
    #[must_use]
    pub fn standard() -> Self {
        Self::new().with_rule("Traders", "Password", FieldRule::Hashed)
    }

    #[must_use]
    pub fn with_rule(
        mut self,
        table: impl Into<String>,
        column: impl Into<String>,
        rule: FieldRule,
    ) -> Self {
        self.rules.insert((table.into(), column.into()), rule);
        self
    }

    #[must_use]
    pub fn rule_for(&self, table: &TableName, column: &str) -> Option<FieldRule> {
        self.rules
            .get(&(table.as_str().to_string(), column.to_string()))
            .copied()
    }

    #[must_use]
    pub fn is_hashed(&self, table: &TableName, column: &str) -> bool {
        self.rule_for(table, column) == Some(FieldRule::Hashed)
    }
}
