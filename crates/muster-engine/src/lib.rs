//! Status engine for the Muster attendance tracker.
//!
//! The roster keeps two kinds of truth about every student: a mutable
//! current status and an immutable history of how it got there. This
//! crate owns the rules that stop the two from drifting apart. All
//! writes go through the [`AttendanceEngine`], which pairs each roster
//! mutation with exactly one history record inside one database
//! transaction.
//!
//! # Architecture
//!
//! ```text
//! Caller (HTTP handler, test, ...)
//!     |
//!     +-- register / transition / bulk_transition --> AttendanceEngine
//!     |       one transaction per student:
//!     |       students row write + records append
//!     |
//!     +-- view / roster -------------------------> ViewComposer
//!             pure reads, student joined with history
//! ```
//!
//! # Modules
//!
//! - [`engine`] -- the [`AttendanceEngine`] write path
//! - [`view`] -- the [`ViewComposer`] read path
//! - [`error`] -- the [`EngineError`] taxonomy
//!
//! # Invariant
//!
//! After every operation, successful or failed, each student's `status`
//! equals the status of their highest-sequence record. Failed
//! operations write nothing; bulk failures leave a fully-applied prefix
//! of per-student transitions, each individually consistent.

pub mod engine;
pub mod error;
pub mod view;

// Re-export primary types at crate root.
pub use engine::{AttendanceEngine, FOUNDING_NOTE};
pub use error::EngineError;
pub use view::ViewComposer;
