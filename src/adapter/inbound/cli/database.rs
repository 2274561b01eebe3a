//! Handlers for `init-db` and `check`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::init_schema;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Drop and recreate every table from the bundled schema.
pub fn execute_init(config: &Config) -> Result<()> {
    let pool = bootstrap::open_pool(&config.database)?;
    init_schema(&pool)?;

    output::section("Database");
    output::field("Path", config.database.path.display());
    output::success("Initialized the database.");
    Ok(())
}

/// Verify the allow-listed tables and print what was found.
pub fn execute_check(config_path: &Path, config: &Config) -> Result<()> {
    output::section("Configuration");
    output::field("Config", config_path.display());
    output::field("Database", config.database.path.display());

    let (crud, _) = bootstrap::build_services(config)?;
    let checks = crud.verify_tables()?;

    for check in &checks {
        output::section(check.table.as_str());
        output::field("Rows", check.row_count);
        match check.schema.primary_key() {
            Some(key) => output::field("Key", &key.name),
            None => output::warning("no primary key; rows are read-only"),
        }
        for column in check.schema.columns() {
            let mut detail = column.declared_type.clone();
            if column.not_null {
                detail.push_str(" NOT NULL");
            }
            if let Some(default) = &column.default_value {
                detail.push_str(" DEFAULT ");
                detail.push_str(default);
            }
            if crud.hooks().is_hashed(&check.table, &column.name) {
                detail.push_str(" (hashed)");
            }
            output::field(&column.name, detail);
        }
    }

    output::success(&format!("{} tables verified", checks.len()));
    Ok(())
}
