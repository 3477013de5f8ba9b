//! HTTP routes for the cart.

use axum::routing::post;
use axum::Router;

use super::handlers::quote_cart;
use crate::adapters::http::state::AppState;

pub fn cart_routes() -> Router<AppState> {
    Router::new().route("/api/cart/quote", post(quote_cart))
}
