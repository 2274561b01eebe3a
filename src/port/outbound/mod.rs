//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod hasher;
pub mod table;
pub mod user;

pub use hasher::PasswordHasher;
pub use table::{TableConnection, TableSource};
pub use user::UserStore;
