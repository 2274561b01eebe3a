//! Tradedesk - a schema-driven web admin for a stock-trading SQLite database.
//!
//! Every allow-listed table gets list, view, create, edit and delete pages
//! without per-table code. Columns come from live schema introspection, and
//! per-column transforms (bcrypt hashing of `Traders.Password`) come from a
//! field hook table.
//!
//! # Architecture
//!
//! - [`domain`] - Allow-list, schema, record and hook types. No SQL.
//! - [`port`] - Traits the application depends on: table source, user
//!   store, password hasher.
//! - [`application`] - The CRUD controller and the auth service.
//! - [`adapter`] - SQLite (Diesel) and bcrypt on the outbound side; the
//!   actix-web HTTP surface and the CLI on the inbound side.
//! - [`infrastructure`] - Configuration and wiring.
//! - [`error`] - Error types for the crate.
//!
//! # Example
//!
//! ```no_run
//! use tradedesk::infrastructure::{bootstrap, config::settings::Config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     let (crud, _auth) = bootstrap::build_services(&config)?;
//!     for table in crud.list_tables()? {
//!         println!("{} {}", table.name, table.row_count);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
