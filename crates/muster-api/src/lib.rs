//! HTTP API server for the Muster attendance tracker.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for registering students, transitioning their
//!   attendance status (one at a time or all at once), and listing the
//!   roster with full per-student histories
//! - **Roster HTML page** (`GET /`) with a registration form, bulk
//!   controls, and a table that re-renders from every API response
//!
//! # Architecture
//!
//! Handlers own request-shape validation (required fields, id and
//! status token parsing) and produce the exact client-facing error
//! messages. Everything after validation goes through the
//! [`AttendanceEngine`](muster_engine::AttendanceEngine), which owns
//! the domain rules, so the HTTP layer stays a thin translation from
//! requests to engine calls and from [`EngineError`] values to status
//! codes.
//!
//! [`EngineError`]: muster_engine::EngineError

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use state::AppState;
