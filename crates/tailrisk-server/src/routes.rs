//! Route definitions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use tailrisk_engine::DashboardEngine;

use crate::handlers::{self, AppState};

/// Create the API router.
pub fn create_router(engine: Arc<DashboardEngine>) -> Router {
    let state = Arc::new(AppState { engine });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Dashboard
        .route("/api/v1/dashboard", get(handlers::dashboard))
        .route("/api/v1/risk", get(handlers::risk))
        .with_state(state)
}
