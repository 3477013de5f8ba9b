//! HTTP routes for booking endpoints.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    assign_provider, change_status, create_bookings, delete_booking, get_booking, list_bookings,
    unassign_provider, upload_results,
};
use crate::adapters::http::state::AppState;

/// Result documents are scanned PDFs and photos.
const MAX_RESULTS_BODY_BYTES: usize = 25 * 1024 * 1024;

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_bookings).get(list_bookings))
        .route("/api/bookings/:booking_id", get(get_booking).delete(delete_booking))
        .route("/api/bookings/:booking_id/status", put(change_status))
        .route("/api/bookings/:booking_id/assign", post(assign_provider))
        .route("/api/bookings/:booking_id/unassign", post(unassign_provider))
        .route(
            "/api/bookings/:booking_id/results",
            post(upload_results).layer(DefaultBodyLimit::max(MAX_RESULTS_BODY_BYTES)),
        )
}
