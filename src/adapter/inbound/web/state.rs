//! Shared application state handed to every handler.

use std::sync::Arc;

use super::session::SessionKeys;
use crate::adapter::outbound::hash::BcryptHasher;
use crate::adapter::outbound::sqlite::{SqliteTables, SqliteUserStore};
use crate::application::{AuthService, CrudController};

/// CRUD controller over the SQLite tables.
pub type Crud = CrudController<SqliteTables, BcryptHasher>;

/// Admin user registration and login.
pub type Auth = AuthService<SqliteUserStore, BcryptHasher>;

/// State registered with `web::Data`.
#[derive(Clone)]
pub struct WebState {
    pub crud: Arc<Crud>,
    pub auth: Arc<Auth>,
    pub sessions: SessionKeys,
}

impl WebState {
    #[must_use]
    pub fn new(crud: Crud, auth: Auth, sessions: SessionKeys) -> Self {
        Self {
            crud: Arc::new(crud),
            auth: Arc::new(auth),
            sessions,
        }
    }
}
