//! HTTP surface built on actix-web.
//!
//! Handlers are thin: they resolve the table name, run the blocking service
//! call on actix's thread pool via `web::block`, and turn user-facing
//! failures into flash messages or a redisplayed form.

pub mod auth;
pub mod error;
pub mod flash;
pub mod pages;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;
pub mod tables;
pub mod view;

pub use routes::configure;
pub use session::{CurrentUser, SessionKeys};
pub use state::WebState;
