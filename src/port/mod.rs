//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The CRUD and auth services are written against these traits; the SQLite
//! and bcrypt adapters implement them.
//!
//! ```text
//!     ┌───────────┐      ┌─────────────────────┐      ┌────────────┐
//!     │  web/cli  │ ───▶ │  application + port │ ───▶ │   sqlite   │
//!     │ (inbound) │      │                     │      │   bcrypt   │
//!     └───────────┘      └─────────────────────┘      └────────────┘
//! ```

pub mod outbound;
