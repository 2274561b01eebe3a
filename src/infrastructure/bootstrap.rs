//! Infrastructure bootstrap helpers for runtime wiring.

use std::fs;
use std::sync::Arc;

use tracing::info;

use crate::adapter::inbound::web::state::{Auth, Crud};
use crate::adapter::inbound::web::{SessionKeys, WebState};
use crate::adapter::outbound::hash::BcryptHasher;
use crate::adapter::outbound::sqlite::{create_pool, DbPool, SqliteTables, SqliteUserStore};
use crate::application::{AuthService, CrudController};
use crate::error::Result;
use crate::infrastructure::config::database::DatabaseConfig;
use crate::infrastructure::config::settings::Config;

/// Open the connection pool, creating the database directory if needed.
///
/// # Errors
/// Returns an error if the directory cannot be created or the pool cannot
/// open a connection.
pub fn open_pool(config: &DatabaseConfig) -> Result<DbPool> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let pool = create_pool(&config.url(), config.connection_options())?;
    info!(path = %config.path.display(), pool_size = config.pool_size, "database pool ready");
    Ok(pool)
}

/// Build the CRUD controller and auth service over one shared pool.
///
/// # Errors
/// Returns an error if the pool cannot be opened.
pub fn build_services(config: &Config) -> Result<(Crud, Auth)> {
    let pool = open_pool(&config.database)?;
    let hasher = BcryptHasher::new(config.auth.bcrypt_cost);

    let crud = CrudController::new(
        SqliteTables::new(pool.clone()),
        hasher,
        Arc::new(config.tables.allow_list()),
        Arc::new(config.tables.field_hooks()),
    );
    let auth = AuthService::new(SqliteUserStore::new(pool), hasher);
    Ok((crud, auth))
}

/// Wire the web state and run the startup table check.
///
/// # Errors
/// Fails when an allow-listed table is missing or has a composite primary
/// key.
pub fn build_web_state(config: &Config) -> Result<WebState> {
    let (crud, auth) = build_services(config)?;

    for check in crud.verify_tables()? {
        info!(
            table = %check.table,
            columns = check.schema.columns().len(),
            rows = check.row_count,
            "table verified"
        );
    }

    let sessions = SessionKeys::new(
        &config.auth.secret_key,
        config.auth.session_hours,
        config.auth.cookie_secure,
    );
    Ok(WebState::new(crud, auth, sessions))
}
