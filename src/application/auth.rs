//! Registration and login for admin users.

use tracing::info;

use crate::domain::User;
use crate::error::AuthError;
use crate::port::outbound::{PasswordHasher, UserStore};

/// Registers users and checks their credentials.
pub struct AuthService<U, H> {
    users: U,
    hasher: H,
}

impl<U, H> AuthService<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(users: U, hasher: H) -> Self {
        Self { users, hasher }
    }

    /// Create an account. Both fields are required; the password is stored
    /// hashed.
    ///
    /// # Errors
    /// [`AuthError::MissingField`] or [`AuthError::UsernameTaken`].
    pub fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::MissingField { field: "Username" });
        }
        if password.is_empty() {
            return Err(AuthError::MissingField { field: "Password" });
        }

        let hash = self.hasher.hash(password)?;
        let user = self.users.create(username, &hash)?;
        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Check a username/password pair.
    ///
    /// # Errors
    /// [`AuthError::UnknownUser`] or [`AuthError::IncorrectPassword`].
    pub fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .users
            .find_by_username(username.trim())?
            .ok_or(AuthError::UnknownUser)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AuthError::IncorrectPassword);
        }

        info!(user_id = user.id, "user logged in");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HashError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryUsers(Mutex<Vec<User>>);

    impl UserStore for MemoryUsers {
        fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
            Ok(self.0.lock().unwrap().iter().find(|u| u.username == username).cloned())
        }

        fn create(&self, username: &str, password_hash: &str) -> Result<User, AuthError> {
            let mut users = self.0.lock().unwrap();
            if users.iter().any(|u| u.username == username) {
                return Err(AuthError::UsernameTaken(username.to_string()));
            }
            let user = User {
                id: users.len() as i32 + 1,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            };
            users.push(user.clone());
            Ok(user)
        }
    }

    struct PrefixHasher;

    impl PasswordHasher for PrefixHasher {
        fn hash(&self, plain: &str) -> Result<String, HashError> {
            Ok(format!("h${plain}"))
        }

        fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashError> {
            Ok(hash == format!("h${plain}"))
        }
    }

    fn service() -> AuthService<MemoryUsers, PrefixHasher> {
        AuthService::new(MemoryUsers::default(), PrefixHasher)
    }

    #[test]
    fn register_then_login() {
        let auth = service();
        let user = auth.register("alice", "pw").unwrap();
        assert_eq!(user.password_hash, "h$pw");

        let logged_in = auth.login("alice", "pw").unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[test]
    fn register_requires_fields() {
        let auth = service();
        assert!(matches!(
            auth.register("  ", "pw"),
            Err(AuthError::MissingField { field: "Username" })
        ));
        assert!(matches!(
            auth.register("alice", ""),
            Err(AuthError::MissingField { field: "Password" })
        ));
    }

    #[test]
    fn duplicate_username_rejected() {
        let auth = service();
        auth.register("alice", "pw").unwrap();
        assert!(matches!(auth.register("alice", "other"), Err(AuthError::UsernameTaken(_))));
    }

    #[test]
    fn bad_credentials() {
        let auth = service();
        auth.register("alice", "pw").unwrap();
        assert!(matches!(auth.login("bob", "pw"), Err(AuthError::UnknownUser)));
        assert!(matches!(auth.login("alice", "nope"), Err(AuthError::IncorrectPassword)));
    }
}
