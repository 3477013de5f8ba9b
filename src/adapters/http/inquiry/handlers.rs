//! HTTP handlers for surgery inquiries.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;

use super::dto::{SubmitInquiryRequest, UpdateInquiryRequest};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::CurrentActor;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::InquiryId;
use crate::domain::inquiry::SurgeryInquiry;

/// POST /api/surgery-inquiries (open to anonymous patients)
pub async fn submit_inquiry(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(request): Json<SubmitInquiryRequest>,
) -> Result<(StatusCode, Json<SurgeryInquiry>), ApiError> {
    let inquiry = state
        .submit_inquiry_handler()
        .handle(request.into(), &actor)
        .await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// GET /api/surgery-inquiries
pub async fn list_inquiries(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<SurgeryInquiry>>, ApiError> {
    Ok(Json(state.manage_inquiries_handler().list(&actor).await?))
}

/// GET /api/surgery-inquiries/:inquiry_id
pub async fn get_inquiry(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(inquiry_id): Path<InquiryId>,
) -> Result<Json<SurgeryInquiry>, ApiError> {
    Ok(Json(state.manage_inquiries_handler().get(inquiry_id, &actor).await?))
}

/// PUT /api/surgery-inquiries/:inquiry_id
pub async fn update_inquiry(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(inquiry_id): Path<InquiryId>,
    Json(request): Json<UpdateInquiryRequest>,
) -> Result<Json<SurgeryInquiry>, ApiError> {
    let inquiry = state
        .manage_inquiries_handler()
        .update(inquiry_id, request.into(), &actor)
        .await?;
    Ok(Json(inquiry))
}

/// DELETE /api/surgery-inquiries/:inquiry_id
pub async fn delete_inquiry(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(inquiry_id): Path<InquiryId>,
) -> Result<StatusCode, ApiError> {
    state.manage_inquiries_handler().delete(inquiry_id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}
