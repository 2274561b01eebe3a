//! SQLite user store implementation.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use super::database::connection::DbPool;
use super::database::model::{NewUserRow, UserRow};
use super::database::schema::user;
use crate::domain::User;
use crate::error::AuthError;
use crate::port::outbound::UserStore;

/// SQLite-backed admin user store.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: DbPool,
}

impl SqliteUserStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserStore for SqliteUserStore {
    fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| AuthError::Connection(e.to_string()))?;

        let row: Option<UserRow> = user::table
            .filter(user::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(row.map(User::from))
    }

    fn create(&self, username: &str, password_hash: &str) -> Result<User, AuthError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| AuthError::Connection(e.to_string()))?;

        let row: UserRow = conn
            .transaction::<_, DieselError, _>(|conn| {
                diesel::insert_into(user::table)
                    .values(&NewUserRow {
                        username,
                        password: password_hash,
                    })
                    .execute(conn)?;
                user::table
                    .filter(user::username.eq(username))
                    .select(UserRow::as_select())
                    .first(conn)
            })
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    AuthError::UsernameTaken(username.to_string())
                }
                other => AuthError::Database(other.to_string()),
            })?;

        Ok(row.into())
    }
}
