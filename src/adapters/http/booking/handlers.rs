//! HTTP handlers for booking endpoints.
//!
//! These handlers connect axum routes to the application layer. Permission
//! checks happen inside the application handlers; this layer only decodes
//! requests and encodes responses.

use axum::extract::{Json, Multipart, Path, Query, State};
use axum::http::StatusCode;

use super::dto::{
    AssignProviderRequest, BookingResponse, ChangeStatusRequest, CreateBookingsRequest,
    CreateBookingsResponse, ListBookingsParams,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::CurrentActor;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    AssignProviderCommand, ChangeStatusCommand, CreateBookingsCommand, ListBookingsQuery,
    UploadResultsCommand,
};
use crate::domain::foundation::BookingId;
use crate::ports::ResultFile;

/// POST /api/bookings
pub async fn create_bookings(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(request): Json<CreateBookingsRequest>,
) -> Result<(StatusCode, Json<CreateBookingsResponse>), ApiError> {
    let bookings = state
        .create_bookings_handler()
        .handle(
            CreateBookingsCommand {
                draft: request.into_draft(),
            },
            &actor,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(bookings.into())))
}

/// GET /api/bookings?status=
pub async fn list_bookings(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(params): Query<ListBookingsParams>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let bookings = state
        .list_bookings_handler()
        .handle(ListBookingsQuery { status: params.status }, &actor)
        .await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

/// GET /api/bookings/:booking_id
pub async fn get_booking(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state.get_booking_handler().handle(booking_id, &actor).await?;
    Ok(Json(booking.into()))
}

/// PUT /api/bookings/:booking_id/status
pub async fn change_status(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(booking_id): Path<BookingId>,
    Json(request): Json<ChangeStatusRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state
        .change_status_handler()
        .handle(
            ChangeStatusCommand {
                booking_id,
                target: request.status,
            },
            &actor,
        )
        .await?;
    Ok(Json(booking.into()))
}

/// POST /api/bookings/:booking_id/assign
pub async fn assign_provider(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(booking_id): Path<BookingId>,
    Json(request): Json<AssignProviderRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state
        .assign_provider_handler()
        .handle(
            AssignProviderCommand {
                booking_id,
                provider_id: request.provider_id,
            },
            &actor,
        )
        .await?;
    Ok(Json(booking.into()))
}

/// POST /api/bookings/:booking_id/unassign
pub async fn unassign_provider(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state
        .unassign_provider_handler()
        .handle(booking_id, &actor)
        .await?;
    Ok(Json(booking.into()))
}

/// POST /api/bookings/:booking_id/results (multipart, one part per file)
pub async fn upload_results(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(booking_id): Path<BookingId>,
    mut multipart: Multipart,
) -> Result<Json<BookingResponse>, ApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Could not read '{}': {}", filename, e)))?;
        files.push(ResultFile {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let booking = state
        .upload_results_handler()
        .handle(UploadResultsCommand { booking_id, files }, &actor)
        .await?;
    Ok(Json(booking.into()))
}

/// DELETE /api/bookings/:booking_id
pub async fn delete_booking(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(booking_id): Path<BookingId>,
) -> Result<StatusCode, ApiError> {
    state.delete_booking_handler().handle(booking_id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}
