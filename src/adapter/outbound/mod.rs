//! Outbound adapters (driven side).

pub mod hash;
pub mod sqlite;
