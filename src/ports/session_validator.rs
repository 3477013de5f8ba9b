//! SessionValidator port - turns a bearer token into an `Actor`.
//!
//! Session issuance belongs to the external auth collaborator. This crate
//! only needs to know who is acting: role, user id and, for provider staff,
//! which provider they belong to.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::access::Actor;

/// Why a token was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Authentication service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Validates access tokens.
///
/// # Contract
///
/// - Unknown or malformed tokens return `AuthError::InvalidToken`
/// - Transient failures return `AuthError::ServiceUnavailable`
/// - Never returns an anonymous actor; absence of a token is handled by the
///   HTTP layer
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` is the raw value without the `Bearer ` prefix.
    async fn validate(&self, token: &str) -> Result<Actor, AuthError>;
}
