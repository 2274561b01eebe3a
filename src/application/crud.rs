//! Dynamic table CRUD controller.
//!
//! One controller serves every allow-listed table. Each operation resolves
//! the table name first (so an unknown table never reaches the database),
//! then acquires a connection and re-introspects the schema. Form handling is
//! schema-driven: fields are visited in column order, the primary key is
//! skipped, required fields must be non-blank, and [`FieldHooks`] decide
//! which values are hashed before storage.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    AllowList, Assignment, FieldHooks, FieldRule, FormFields, Record, TableName, TableSchema,
};
use crate::error::CrudError;
use crate::port::outbound::{PasswordHasher, TableConnection, TableSource};

/// Row count for one table on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub name: TableName,
    pub row_count: i64,
}

/// Everything needed to render a table's rows.
#[derive(Debug, Clone)]
pub struct TableView {
    pub table: TableName,
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
    /// Addressing column for edit/delete links, if the table has one.
    pub primary_key: Option<String>,
}

/// An existing record loaded for editing.
#[derive(Debug, Clone)]
pub struct EditForm {
    pub table: TableName,
    pub schema: TableSchema,
    pub record: Record,
    pub primary_key: String,
}

/// Startup report for one table.
#[derive(Debug, Clone)]
pub struct TableCheck {
    pub table: TableName,
    pub schema: TableSchema,
    pub row_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Insert,
    Update,
}

/// Schema-driven CRUD over the tables of an [`AllowList`].
pub struct CrudController<S, H> {
    source: S,
    hasher: H,
    tables: Arc<AllowList>,
    hooks: Arc<FieldHooks>,
}

impl<S, H> CrudController<S, H>
where
    S: TableSource,
    H: PasswordHasher,
{
    pub fn new(source: S, hasher: H, tables: Arc<AllowList>, hooks: Arc<FieldHooks>) -> Self {
        Self {
            source,
            hasher,
            tables,
            hooks,
        }
    }

    #[must_use]
    pub fn tables(&self) -> &AllowList {
        &self.tables
    }

    #[must_use]
    pub fn hooks(&self) -> &FieldHooks {
        &self.hooks
    }

    /// Resolve a requested table name against the allow-list.
    ///
    /// # Errors
    /// Returns [`CrudError::NotFound`] for any name outside the list.
    pub fn resolve(&self, name: &str) -> Result<TableName, CrudError> {
        self.tables
            .resolve(name)
            .cloned()
            .ok_or_else(|| CrudError::NotFound(name.to_string()))
    }

    /// Name and row count for every allow-listed table, in list order.
    pub fn list_tables(&self) -> Result<Vec<TableSummary>, CrudError> {
        let mut conn = self.source.connect()?;
        self.tables
            .iter()
            .map(|table| {
                Ok(TableSummary {
                    name: table.clone(),
                    row_count: conn.count(table)?,
                })
            })
            .collect()
    }

    /// All rows of a table plus the columns to display.
    ///
    /// Columns come from the first row when there is one; an empty table
    /// still gets a header from schema introspection.
    pub fn view_table(&self, name: &str) -> Result<TableView, CrudError> {
        let table = self.resolve(name)?;
        let mut conn = self.source.connect()?;
        let schema = conn.schema(&table)?;
        let rows = conn.fetch_all(&table, &schema)?;

        let columns = match rows.first() {
            Some(first) => first.column_names(),
            None => schema.column_names(),
        };
        debug!(table = %table, rows = rows.len(), "table loaded");

        Ok(TableView {
            primary_key: schema.primary_key().map(|key| key.name.clone()),
            table,
            columns,
            rows,
        })
    }

    /// Live column list of a table.
    pub fn get_schema(&self, name: &str) -> Result<TableSchema, CrudError> {
        let table = self.resolve(name)?;
        let mut conn = self.source.connect()?;
        conn.schema(&table)
    }

    /// Validate a submitted form and insert it as a new row.
    ///
    /// # Errors
    /// - [`CrudError::Validation`] when a required field is blank; nothing is
    ///   written.
    /// - [`CrudError::Integrity`] when the database rejects the row.
    pub fn create(&self, name: &str, form: &FormFields) -> Result<TableName, CrudError> {
        let table = self.resolve(name)?;
        let mut conn = self.source.connect()?;
        let schema = conn.schema(&table)?;

        let values = self.assignments(&table, &schema, form, WriteMode::Insert)?;
        conn.insert(&table, &values).inspect_err(|err| {
            if let CrudError::Integrity(reason) = err {
                warn!(table = %table, reason = %reason, "insert rejected");
            }
        })?;

        info!(table = %table, fields = values.len(), "record created");
        Ok(table)
    }

    /// Load a record by primary key for the edit form.
    ///
    /// # Errors
    /// [`CrudError::MissingPrimaryKey`] or [`CrudError::RecordNotFound`] are
    /// reported to the user rather than treated as faults.
    pub fn edit_form(&self, name: &str, id: &str) -> Result<EditForm, CrudError> {
        let table = self.resolve(name)?;
        let mut conn = self.source.connect()?;
        let schema = conn.schema(&table)?;
        let (record, primary_key) = Self::load_record(&mut conn, &table, &schema, id)?;

        Ok(EditForm {
            table,
            schema,
            record,
            primary_key,
        })
    }

    /// Validate a submitted form and update the addressed row.
    ///
    /// Validation matches [`CrudController::create`], except that a blank
    /// hashed field keeps its stored value.
    pub fn edit(&self, name: &str, id: &str, form: &FormFields) -> Result<TableName, CrudError> {
        let table = self.resolve(name)?;
        let mut conn = self.source.connect()?;
        let schema = conn.schema(&table)?;
        let (_, key_name) = Self::load_record(&mut conn, &table, &schema, id)?;

        let values = self.assignments(&table, &schema, form, WriteMode::Update)?;
        if values.is_empty() {
            debug!(table = %table, id, "nothing to update");
            return Ok(table);
        }

        let key = schema
            .column(&key_name)
            .ok_or_else(|| CrudError::MissingPrimaryKey {
                table: table.to_string(),
            })?;
        let updated = conn.update(&table, &values, key, id).inspect_err(|err| {
            if let CrudError::Integrity(reason) = err {
                warn!(table = %table, id, reason = %reason, "update rejected");
            }
        })?;
        if updated == 0 {
            return Err(CrudError::RecordNotFound {
                table: table.to_string(),
                id: id.to_string(),
            });
        }

        info!(table = %table, id, fields = values.len(), "record updated");
        Ok(table)
    }

    /// Delete the row addressed by primary key.
    ///
    /// # Errors
    /// [`CrudError::Integrity`] when another row still references this one;
    /// the row is left in place.
    pub fn delete(&self, name: &str, id: &str) -> Result<TableName, CrudError> {
        let table = self.resolve(name)?;
        let mut conn = self.source.connect()?;
        let schema = conn.schema(&table)?;
        let key = schema
            .primary_key()
            .ok_or_else(|| CrudError::MissingPrimaryKey {
                table: table.to_string(),
            })?;

        let deleted = conn.delete(&table, key, id).inspect_err(|err| {
            if let CrudError::Integrity(reason) = err {
                warn!(table = %table, id, reason = %reason, "delete rejected");
            }
        })?;
        if deleted == 0 {
            return Err(CrudError::RecordNotFound {
                table: table.to_string(),
                id: id.to_string(),
            });
        }

        info!(table = %table, id, "record deleted");
        Ok(table)
    }

    /// Check every allow-listed table exists and is addressable by at most
    /// one key column.
    ///
    /// # Errors
    /// [`CrudError::MissingTable`] or [`CrudError::CompositePrimaryKey`] for
    /// the first offending table.
    pub fn verify_tables(&self) -> Result<Vec<TableCheck>, CrudError> {
        let mut conn = self.source.connect()?;
        let mut checks = Vec::with_capacity(self.tables.len());

        for table in self.tables.iter() {
            let schema = conn.schema(table)?;
            if schema.is_empty() {
                return Err(CrudError::MissingTable {
                    table: table.to_string(),
                });
            }

            let keys: Vec<&str> = schema
                .primary_key_columns()
                .map(|column| column.name.as_str())
                .collect();
            if keys.len() > 1 {
                return Err(CrudError::CompositePrimaryKey {
                    table: table.to_string(),
                    columns: keys.join(", "),
                });
            }
            if keys.is_empty() {
                warn!(table = %table, "table has no primary key; rows will be read-only");
            }

            checks.push(TableCheck {
                table: table.clone(),
                row_count: conn.count(table)?,
                schema,
            });
        }

        Ok(checks)
    }

    fn load_record(
        conn: &mut S::Connection,
        table: &TableName,
        schema: &TableSchema,
        id: &str,
    ) -> Result<(Record, String), CrudError> {
        let key = schema
            .primary_key()
            .ok_or_else(|| CrudError::MissingPrimaryKey {
                table: table.to_string(),
            })?;

        let record = conn
            .fetch_one(table, schema, key, id)?
            .ok_or_else(|| CrudError::RecordNotFound {
                table: table.to_string(),
                id: id.to_string(),
            })?;

        Ok((record, key.name.clone()))
    }

    /// Walk the schema in order and build the column values to write.
    ///
    /// Stops at the first blank required field. Optional blank fields are
    /// left out so the column takes NULL or its default.
    fn assignments(
        &self,
        table: &TableName,
        schema: &TableSchema,
        form: &FormFields,
        mode: WriteMode,
    ) -> Result<Vec<Assignment>, CrudError> {
        let mut values = Vec::new();

        for column in schema.columns().iter().filter(|column| !column.primary_key) {
            let value = form.trimmed(&column.name);
            let rule = self.hooks.rule_for(table, &column.name);

            if mode == WriteMode::Update && rule == Some(FieldRule::Hashed) && value.is_empty() {
                continue;
            }
            if value.is_empty() {
                if column.not_null {
                    return Err(CrudError::Validation {
                        field: column.name.clone(),
                    });
                }
                continue;
            }

            let stored = match rule {
                Some(FieldRule::Hashed) => self.hasher.hash(value)?,
                None => value.to_string(),
            };
            values.push(Assignment::new(column, stored));
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::tests::{column, stocks};
    use crate::error::HashError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every call so tests can assert what reached the database.
    #[derive(Default)]
    struct Journal {
        connects: AtomicUsize,
        inserts: Mutex<Vec<Vec<Assignment>>>,
        updates: Mutex<Vec<Vec<Assignment>>>,
    }

    struct FakeSource {
        journal: Arc<Journal>,
        schema: TableSchema,
        rows: Vec<Record>,
    }

    struct FakeConnection {
        journal: Arc<Journal>,
        schema: TableSchema,
        rows: Vec<Record>,
    }

    impl TableSource for FakeSource {
        type Connection = FakeConnection;

        fn connect(&self) -> Result<FakeConnection, CrudError> {
            self.journal.connects.fetch_add(1, Ordering::SeqCst);
            Ok(FakeConnection {
                journal: Arc::clone(&self.journal),
                schema: self.schema.clone(),
                rows: self.rows.clone(),
            })
        }
    }

    impl TableConnection for FakeConnection {
        fn count(&mut self, _table: &TableName) -> Result<i64, CrudError> {
            Ok(self.rows.len() as i64)
        }

        fn schema(&mut self, _table: &TableName) -> Result<TableSchema, CrudError> {
            Ok(self.schema.clone())
        }

        fn fetch_all(
            &mut self,
            _table: &TableName,
            _schema: &TableSchema,
        ) -> Result<Vec<Record>, CrudError> {
            Ok(self.rows.clone())
        }

        fn fetch_one(
            &mut self,
            _table: &TableName,
            _schema: &TableSchema,
            key: &crate::domain::ColumnSchema,
            id: &str,
        ) -> Result<Option<Record>, CrudError> {
            Ok(self
                .rows
                .iter()
                .find(|row| row.display(&key.name) == id)
                .cloned())
        }

        fn insert(&mut self, _table: &TableName, values: &[Assignment]) -> Result<(), CrudError> {
            self.journal.inserts.lock().unwrap().push(values.to_vec());
            Ok(())
        }

        fn update(
            &mut self,
            _table: &TableName,
            values: &[Assignment],
            _key: &crate::domain::ColumnSchema,
            _id: &str,
        ) -> Result<usize, CrudError> {
            self.journal.updates.lock().unwrap().push(values.to_vec());
            Ok(1)
        }

        fn delete(
            &mut self,
            _table: &TableName,
            _key: &crate::domain::ColumnSchema,
            _id: &str,
        ) -> Result<usize, CrudError> {
            Ok(1)
        }
    }

    struct ReverseHasher;

    impl PasswordHasher for ReverseHasher {
        fn hash(&self, plain: &str) -> Result<String, HashError> {
            Ok(format!("hashed:{}", plain.chars().rev().collect::<String>()))
        }

        fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashError> {
            Ok(self.hash(plain)? == hash)
        }
    }

    fn traders() -> TableSchema {
        TableSchema::new(vec![
            column(0, "TraderID", "INTEGER", false, true),
            column(1, "Name", "TEXT", true, false),
            column(2, "Password", "TEXT", true, false),
            column(3, "Email", "TEXT", false, false),
        ])
    }

    fn controller(
        schema: TableSchema,
        rows: Vec<Record>,
    ) -> (CrudController<FakeSource, ReverseHasher>, Arc<Journal>) {
        let journal = Arc::new(Journal::default());
        let source = FakeSource {
            journal: Arc::clone(&journal),
            schema,
            rows,
        };
        let crud = CrudController::new(
            source,
            ReverseHasher,
            Arc::new(AllowList::default()),
            Arc::new(FieldHooks::standard()),
        );
        (crud, journal)
    }

    fn trader_row(id: i64) -> Record {
        Record::from_columns(
            &traders().column_names(),
            vec![
                serde_json::json!(id),
                serde_json::json!("Ada"),
                serde_json::json!("hashed:old"),
                serde_json::Value::Null,
            ],
        )
    }

    #[test]
    fn unknown_table_never_connects() {
        let (crud, journal) = controller(stocks(), vec![]);
        let form = FormFields::new();

        assert!(matches!(crud.view_table("user"), Err(CrudError::NotFound(_))));
        assert!(matches!(crud.get_schema("sqlite_master"), Err(CrudError::NotFound(_))));
        assert!(matches!(crud.create("Users", &form), Err(CrudError::NotFound(_))));
        assert!(matches!(crud.edit_form("Users", "1"), Err(CrudError::NotFound(_))));
        assert!(matches!(crud.edit("Users", "1", &form), Err(CrudError::NotFound(_))));
        assert!(matches!(crud.delete("Users", "1"), Err(CrudError::NotFound(_))));

        assert_eq!(journal.connects.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn create_skips_key_and_blank_optional_fields() {
        let (crud, journal) = controller(stocks(), vec![]);
        let form: FormFields = [("id", "99"), ("symbol", " AAPL "), ("name", "")]
            .into_iter()
            .collect();

        crud.create("Stocks", &form).unwrap();

        let inserts = journal.inserts.lock().unwrap();
        assert_eq!(inserts.len(), 1);
        let written: Vec<(&str, &str)> = inserts[0]
            .iter()
            .map(|a| (a.column(), a.value()))
            .collect();
        assert_eq!(written, vec![("symbol", "AAPL")]);
    }

    #[test]
    fn create_rejects_blank_required_field() {
        let (crud, journal) = controller(stocks(), vec![]);
        let form: FormFields = [("symbol", "   "), ("name", "Apple")].into_iter().collect();

        let err = crud.create("Stocks", &form).unwrap_err();
        assert!(matches!(err, CrudError::Validation { ref field } if field == "symbol"));
        assert!(journal.inserts.lock().unwrap().is_empty());
    }

    #[test]
    fn validation_stops_at_first_blank_required_field() {
        let (crud, _) = controller(traders(), vec![]);
        let form = FormFields::new();

        let err = crud.create("Traders", &form).unwrap_err();
        assert!(matches!(err, CrudError::Validation { ref field } if field == "Name"));
    }

    #[test]
    fn create_hashes_trader_password() {
        let (crud, journal) = controller(traders(), vec![]);
        let form: FormFields = [("Name", "Ada"), ("Password", "secret")].into_iter().collect();

        crud.create("Traders", &form).unwrap();

        let inserts = journal.inserts.lock().unwrap();
        let password = inserts[0].iter().find(|a| a.column() == "Password").unwrap();
        assert_eq!(password.value(), "hashed:terces");
    }

    #[test]
    fn create_requires_trader_password() {
        let (crud, journal) = controller(traders(), vec![]);
        let form: FormFields = [("Name", "Ada"), ("Password", "")].into_iter().collect();

        let err = crud.create("Traders", &form).unwrap_err();
        assert!(matches!(err, CrudError::Validation { ref field } if field == "Password"));
        assert!(journal.inserts.lock().unwrap().is_empty());
    }

    #[test]
    fn edit_with_blank_password_leaves_it_out() {
        let (crud, journal) = controller(traders(), vec![trader_row(1)]);
        let form: FormFields = [("Name", "Ada L."), ("Password", "")].into_iter().collect();

        crud.edit("Traders", "1", &form).unwrap();

        let updates = journal.updates.lock().unwrap();
        let columns: Vec<&str> = updates[0].iter().map(Assignment::column).collect();
        assert_eq!(columns, vec!["Name"]);
    }

    #[test]
    fn edit_with_new_password_rehashes() {
        let (crud, journal) = controller(traders(), vec![trader_row(1)]);
        let form: FormFields = [("Name", "Ada"), ("Password", "n3w")].into_iter().collect();

        crud.edit("Traders", "1", &form).unwrap();

        let updates = journal.updates.lock().unwrap();
        let password = updates[0].iter().find(|a| a.column() == "Password").unwrap();
        assert_eq!(password.value(), "hashed:w3n");
    }

    #[test]
    fn edit_missing_record_is_reported() {
        let (crud, journal) = controller(traders(), vec![trader_row(1)]);
        let form: FormFields = [("Name", "Ada")].into_iter().collect();

        let err = crud.edit("Traders", "7", &form).unwrap_err();
        assert!(matches!(err, CrudError::RecordNotFound { ref id, .. } if id == "7"));
        assert!(journal.updates.lock().unwrap().is_empty());
    }

    #[test]
    fn keyless_table_refuses_edit_and_delete() {
        let schema = TableSchema::new(vec![column(0, "note", "TEXT", false, false)]);
        let (crud, _) = controller(schema, vec![]);

        assert!(matches!(
            crud.edit_form("Watchlists", "1"),
            Err(CrudError::MissingPrimaryKey { .. })
        ));
        assert!(matches!(
            crud.delete("Watchlists", "1"),
            Err(CrudError::MissingPrimaryKey { .. })
        ));
    }

    #[test]
    fn empty_table_view_uses_schema_header() {
        let (crud, _) = controller(stocks(), vec![]);

        let view = crud.view_table("Stocks").unwrap();
        assert!(view.rows.is_empty());
        assert_eq!(view.columns, vec!["id", "symbol", "name"]);
        assert_eq!(view.primary_key.as_deref(), Some("id"));
    }

    #[test]
    fn list_tables_counts_each_table() {
        let (crud, journal) = controller(stocks(), vec![Record::default(), Record::default()]);

        let summaries = crud.list_tables().unwrap();
        assert_eq!(summaries.len(), 5);
        assert!(summaries.iter().all(|s| s.row_count == 2));
        assert_eq!(summaries[0].name.as_str(), "Traders");
        assert_eq!(journal.connects.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn verify_rejects_composite_keys() {
        let schema = TableSchema::new(vec![
            column(0, "TraderID", "INTEGER", true, true),
            column(1, "StockID", "INTEGER", true, true),
        ]);
        let (crud, _) = controller(schema, vec![]);

        let err = crud.verify_tables().unwrap_err();
        assert!(matches!(
            err,
            CrudError::CompositePrimaryKey { ref columns, .. } if columns == "TraderID, StockID"
        ));
    }

    #[test]
    fn verify_rejects_missing_tables() {
        let (crud, _) = controller(TableSchema::default(), vec![]);
        assert!(matches!(crud.verify_tables(), Err(CrudError::MissingTable { .. })));
    }
}
