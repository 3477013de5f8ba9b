//! Authentication middleware and the `CurrentActor` extractor.
//!
//! ```text
//! Request → auth_middleware → inserts Actor into extensions
//!                                      ↓
//!                              Handler → CurrentActor reads it (anonymous if absent)
//! ```
//!
//! The middleware only establishes *who* is calling. Whether that actor may
//! do something is decided by the permission gate inside the application
//! layer, so a missing token is not an error here.

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::super::error::ErrorResponse;
use crate::domain::access::Actor;
use crate::ports::{AuthError, SessionValidator};

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Resolves `Authorization: Bearer <token>` into an `Actor`.
///
/// - No header: continues as anonymous
/// - Valid token: the actor is inserted into request extensions
/// - Invalid or expired token: 401
/// - Validator unavailable: 503
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(actor) => {
            tracing::debug!(role = %actor.role, actor = %actor.audit_id(), "request authenticated");
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        Err(e) => {
            let status = match &e {
                AuthError::ServiceUnavailable(msg) => {
                    tracing::error!("Auth service unavailable: {}", msg);
                    StatusCode::SERVICE_UNAVAILABLE
                }
                AuthError::InvalidToken | AuthError::TokenExpired => {
                    tracing::debug!(error = %e, "bearer token rejected");
                    StatusCode::UNAUTHORIZED
                }
            };
            (status, Json(ErrorResponse::unauthenticated(e.to_string()))).into_response()
        }
    }
}

/// The actor making the request. Anonymous when no token was presented.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentActor(
            parts
                .extensions
                .get::<Actor>()
                .cloned()
                .unwrap_or_else(Actor::anonymous),
        ))
    }
}
