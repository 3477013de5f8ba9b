//! HTTP handler for cart quoting.

use axum::extract::{Json, State};

use super::dto::{CartQuoteResponse, QuoteCartRequest};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::QuoteCartCommand;

/// POST /api/cart/quote
pub async fn quote_cart(
    State(state): State<AppState>,
    Json(request): Json<QuoteCartRequest>,
) -> Result<Json<CartQuoteResponse>, ApiError> {
    let quote = state
        .quote_cart_handler()
        .handle(QuoteCartCommand { items: request.items })
        .await?;
    Ok(Json(quote.into()))
}
