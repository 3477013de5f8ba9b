//! HTTP routes for the admin dashboard.

use axum::routing::get;
use axum::Router;

use super::handlers::booking_statistics;
use crate::adapters::http::state::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/api/dashboard/stats", get(booking_statistics))
}
