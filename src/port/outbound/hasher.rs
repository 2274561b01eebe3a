//! One-way password hashing.

use crate::error::HashError;

/// Hashes secrets before storage and verifies them later.
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted one-way hash of `plain`.
    fn hash(&self, plain: &str) -> Result<String, HashError>;

    /// Check `plain` against a hash produced by [`PasswordHasher::hash`].
    fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashError>;
}
