//! Bcrypt password hashing.

use crate::error::HashError;
use crate::port::outbound::PasswordHasher;

/// Bcrypt hasher with a fixed cost factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Lowest cost bcrypt accepts; only suitable for tests.
    pub const MIN_COST: u32 = 4;

    #[must_use]
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plain: &str) -> Result<String, HashError> {
        bcrypt::hash(plain, self.cost).map_err(|e| HashError(e.to_string()))
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashError> {
        bcrypt::verify(plain, hash).map_err(|e| HashError(e.to_string()))
    }
}
