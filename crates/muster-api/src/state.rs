//! Shared application state for the roster API server.

use muster_engine::AttendanceEngine;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Holds the one [`AttendanceEngine`] every handler calls
/// into; the engine carries the connection pool, so the state itself
/// has no lifecycle to manage.
#[derive(Clone)]
pub struct AppState {
    /// The status engine backing all endpoints.
    pub engine: AttendanceEngine,
}

impl AppState {
    /// Create application state around an engine.
    pub const fn new(engine: AttendanceEngine) -> Self {
        Self { engine }
    }
}
