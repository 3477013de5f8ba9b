//! HTTP routes for catalog endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{list_providers, list_tests, provider_tests, search_tests, test_pricing};
use crate::adapters::http::state::AppState;

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/public/tests", get(list_tests))
        .route("/api/public/tests/search", get(search_tests))
        .route("/api/public/tests/:test_id/pricing", get(test_pricing))
        .route("/api/public/providers", get(list_providers))
        .route("/api/public/providers/:provider_id/tests", get(provider_tests))
}
