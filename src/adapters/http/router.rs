//! Assembles the full API router.

use std::time::Duration;

use http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::booking::booking_routes;
use super::cart::cart_routes;
use super::catalog::catalog_routes;
use super::dashboard::dashboard_routes;
use super::inquiry::inquiry_routes;
use super::middleware::{auth_middleware, AuthState};
use super::state::AppState;
use crate::config::ServerConfig;

/// Every route plus auth, tracing, CORS and request timeout layers.
pub fn api_router(state: AppState, validator: AuthState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(catalog_routes())
        .merge(cart_routes())
        .merge(booking_routes())
        .merge(dashboard_routes())
        .merge(inquiry_routes())
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": env!("CARGO_PKG_NAME") }))
}

/// No configured origins means any origin, which suits local development.
/// Unparseable origins are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
