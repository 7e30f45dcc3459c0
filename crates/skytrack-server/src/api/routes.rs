//! REST API routes.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::api::ws;
use crate::state::{DashboardSnapshot, DashboardStore};

/// Create the API router.
pub fn create_router() -> Router<Arc<DashboardStore>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/v1/dashboard", get(get_dashboard))
        .route("/v1/stream", get(ws::ws_handler))
}

async fn get_dashboard(State(store): State<Arc<DashboardStore>>) -> Json<DashboardSnapshot> {
    Json(store.snapshot())
}
