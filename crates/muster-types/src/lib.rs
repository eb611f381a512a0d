//! Shared type definitions for the Muster attendance tracker.
//!
//! Everything that crosses a crate boundary lives here: identifiers,
//! the attendance status enumeration, and the student and record
//! structures. Types derive [`ts_rs::TS`] so the frontend bindings stay
//! in lockstep with the Rust definitions.
//!
//! # Modules
//!
//! - [`ids`] -- strongly typed UUID newtypes
//! - [`status`] -- the closed attendance status set
//! - [`structs`] -- students, attendance records, and composed views

pub mod ids;
pub mod status;
pub mod structs;

pub use ids::StudentId;
pub use status::{AttendanceStatus, ParseStatusError};
pub use structs::{AttendanceRecord, Student, StudentView};
