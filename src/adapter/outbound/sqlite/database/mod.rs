//! SQLite database modules.
//!
//! Provides connection pooling, the bootstrap schema, and the Diesel
//! definitions for the `user` table.

pub mod connection;
pub mod model;
pub mod schema;
