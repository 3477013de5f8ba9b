//! HTTP routes for surgery inquiries.

use axum::routing::get;
use axum::Router;

use super::handlers::{delete_inquiry, get_inquiry, list_inquiries, submit_inquiry, update_inquiry};
use crate::adapters::http::state::AppState;

pub fn inquiry_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/surgery-inquiries",
            get(list_inquiries).post(submit_inquiry),
        )
        .route(
            "/api/surgery-inquiries/:inquiry_id",
            get(get_inquiry).put(update_inquiry).delete(delete_inquiry),
        )
}
