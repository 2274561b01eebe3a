//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::user;
use crate::domain::User;

/// Database row for an admin user (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = user)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub password: String,
}

/// Database row for an admin user (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = user)]
pub struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password,
        }
    }
}
