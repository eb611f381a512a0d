//! Data layer for the Muster attendance tracker (`PostgreSQL`).
//!
//! One database, two tables: `students` carries the current state of the
//! roster, `records` carries the append-only history of every status
//! change. The stores in this crate are deliberately thin. Anything that
//! must happen atomically across both tables is composed by the engine
//! crate inside a single transaction using the connection-taking write
//! functions exposed here.
//!
//! ```text
//! Engine operation
//!     |
//!     +-- reads  --> RosterStore / RecordStore  (pool)
//!     |
//!     +-- writes --> one transaction
//!         |-- RosterStore::insert / set_status
//!         +-- RecordStore::append
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` connection pool and configuration
//! - [`roster_store`] -- current-state rows in the `students` table
//! - [`record_store`] -- append-only history in the `records` table
//! - [`error`] -- shared error types

pub mod error;
pub mod postgres;
pub mod record_store;
pub mod roster_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use postgres::{PostgresConfig, PostgresPool};
pub use record_store::RecordStore;
pub use roster_store::RosterStore;
