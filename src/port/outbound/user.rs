//! Persistence for admin user accounts.

use crate::domain::User;
use crate::error::AuthError;

/// Storage operations for users.
pub trait UserStore: Send + Sync {
    /// Look a user up by username.
    fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Insert a new user. A taken username yields [`AuthError::UsernameTaken`].
    fn create(&self, username: &str, password_hash: &str) -> Result<User, AuthError>;
}
