//! HTTP handler for the admin dashboard.

use axum::extract::{Json, State};

use super::dto::StatisticsResponse;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::CurrentActor;
use crate::adapters::http::state::AppState;

/// GET /api/dashboard/stats
pub async fn booking_statistics(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let stats = state.booking_statistics_handler().handle(&actor).await?;
    Ok(Json(stats.into()))
}
