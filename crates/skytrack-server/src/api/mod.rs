//! HTTP feed for dashboard clients.

mod routes;
pub mod ws;

use std::sync::Arc;

use axum::Router;

use crate::state::DashboardStore;

pub fn routes() -> Router<Arc<DashboardStore>> {
    routes::create_router()
}
