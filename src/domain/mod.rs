//! Database-agnostic domain types.
//!
//! Nothing here touches SQL. The allow-list, schema descriptions, records and
//! field hooks are plain values that the CRUD controller and the adapters
//! pass around.

pub mod hook;
pub mod record;
pub mod schema;
pub mod table;
pub mod user;

pub use hook::{FieldHooks, FieldRule};
pub use record::{Assignment, FormFields, Record, Value};
pub use schema::{Affinity, ColumnSchema, TableSchema};
pub use table::{AllowList, TableName, DEFAULT_TABLES};
pub use user::User;
