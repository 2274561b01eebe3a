//! Application services (use cases).
//!
//! These services hold the request-independent rules of the admin and talk
//! to the outside world only through the traits in [`crate::port`].

pub mod auth;
pub mod crud;

pub use auth::AuthService;
pub use crud::{CrudController, EditForm, TableCheck, TableSummary, TableView};
