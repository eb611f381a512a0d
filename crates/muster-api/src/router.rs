//! Axum router construction for the roster API.
//!
//! Assembles the roster page and REST routes into a single [`Router`]
//! with CORS middleware enabled for cross-origin clients.

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the roster server.
///
/// The router includes:
/// - `GET /` -- roster HTML page
/// - `GET /api/students` -- list all students with histories
/// - `POST /api/students` -- register a student
/// - `PATCH /api/students/:id` -- transition one student
/// - `POST /api/students/bulk` -- transition every student
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Roster page
        .route("/", get(handlers::index))
        // REST API
        .route(
            "/api/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route("/api/students/bulk", post(handlers::bulk_update))
        .route("/api/students/{id}", patch(handlers::update_student))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
