//! Allow-list and field hook configuration.

use serde::Deserialize;

use crate::domain::{AllowList, FieldHooks, FieldRule, DEFAULT_TABLES};

/// A column whose submitted values are stored as a one-way hash.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HashedField {
    pub table: String,
    pub column: String,
}

/// Which tables the admin exposes and which columns get transformed.
#[derive(Debug, Clone, Deserialize)]
pub struct TablesConfig {
    #[serde(default = "default_allow")]
    pub allow: Vec<String>,
    #[serde(default = "default_hashed_fields")]
    pub hashed_fields: Vec<HashedField>,
}

fn default_allow() -> Vec<String> {
    DEFAULT_TABLES.iter().map(ToString::to_string).collect()
}

fn default_hashed_fields() -> Vec<HashedField> {
    vec![HashedField {
        table: "Traders".into(),
        column: "Password".into(),
    }]
}

impl TablesConfig {
    #[must_use]
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(self.allow.iter().cloned())
    }

    #[must_use]
    pub fn field_hooks(&self) -> FieldHooks {
        self.hashed_fields
            .iter()
            .fold(FieldHooks::new(), |hooks, field| {
                hooks.with_rule(field.table.clone(), field.column.clone(), FieldRule::Hashed)
            })
    }
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            allow: default_allow(),
            hashed_fields: default_hashed_fields(),
        }
    }
}
