//! HTTP handlers for catalog endpoints. All are public.

use axum::extract::{Json, Path, Query, State};

use super::dto::{ProviderOfferResponse, SearchQuery, TestOfferResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::domain::catalog::{LabTest, Provider};
use crate::domain::foundation::{ProviderId, TestId};

/// GET /api/public/tests
pub async fn list_tests(State(state): State<AppState>) -> Result<Json<Vec<LabTest>>, ApiError> {
    Ok(Json(state.browse_catalog_handler().list_tests().await?))
}

/// GET /api/public/providers
pub async fn list_providers(State(state): State<AppState>) -> Result<Json<Vec<Provider>>, ApiError> {
    Ok(Json(state.browse_catalog_handler().list_providers().await?))
}

/// GET /api/public/tests/:test_id/pricing
pub async fn test_pricing(
    State(state): State<AppState>,
    Path(test_id): Path<TestId>,
) -> Result<Json<Vec<ProviderOfferResponse>>, ApiError> {
    let offers = state.browse_catalog_handler().providers_for_test(test_id).await?;
    Ok(Json(offers.into_iter().map(Into::into).collect()))
}

/// GET /api/public/providers/:provider_id/tests
pub async fn provider_tests(
    State(state): State<AppState>,
    Path(provider_id): Path<ProviderId>,
) -> Result<Json<Vec<TestOfferResponse>>, ApiError> {
    let offers = state.browse_catalog_handler().tests_for_provider(provider_id).await?;
    Ok(Json(offers.into_iter().map(Into::into).collect()))
}

/// GET /api/public/tests/search?query=
pub async fn search_tests(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<LabTest>>, ApiError> {
    let query = params.query.unwrap_or_default();
    Ok(Json(state.browse_catalog_handler().search_tests(&query).await?))
}
