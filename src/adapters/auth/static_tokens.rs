//! Static-table SessionValidator.
//!
//! Maps opaque bearer tokens to actors. Used in development and tests, and
//! as the stand-in until the external identity provider is connected.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::StaticTokenEntry;
use crate::domain::access::{Actor, Role};
use crate::domain::foundation::{ProviderId, UserId, ValidationError};
use crate::ports::{AuthError, SessionValidator};

/// Token table validator.
///
/// # Example
///
/// ```ignore
/// let validator = StaticTokenValidator::new()
///     .with_actor("admin-token", Actor::admin(UserId::new("u-1")?));
/// let actor = validator.validate("admin-token").await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, Actor>,
}

impl StaticTokenValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(mut self, token: impl Into<String>, actor: Actor) -> Self {
        self.tokens.insert(token.into(), actor);
        self
    }

    /// Builds the table from configuration entries.
    ///
    /// Provider staff entries must name their provider; other roles must not.
    pub fn from_entries(entries: &[StaticTokenEntry]) -> Result<Self, ValidationError> {
        let mut validator = Self::new();
        for entry in entries {
            let role: Role = entry.role.parse()?;
            let user_id = UserId::new(entry.user_id.clone())?;
            let actor = match (role, entry.provider_id.as_deref()) {
                (Role::Anonymous, _) => {
                    return Err(ValidationError::invalid_format(
                        "role",
                        "tokens cannot be issued for the anonymous role",
                    ))
                }
                (role, Some(provider)) if role.is_provider_staff() => {
                    let provider_id: ProviderId = provider.parse().map_err(|_| {
                        ValidationError::invalid_format("provider_id", "expected a UUID")
                    })?;
                    Actor::provider_staff(role, user_id, provider_id)
                }
                (role, None) if role.is_provider_staff() => {
                    return Err(ValidationError::empty_field("provider_id"))
                }
                (Role::Admin, None) => Actor::admin(user_id),
                (Role::SubAdmin, None) => Actor::sub_admin(user_id),
                (_, Some(_)) => {
                    return Err(ValidationError::invalid_format(
                        "provider_id",
                        "only clinic and lab technician staff belong to a provider",
                    ))
                }
                (_, None) => {
                    return Err(ValidationError::invalid_format("role", "unsupported role"))
                }
            };
            validator.tokens.insert(entry.token.clone(), actor);
        }
        Ok(validator)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl SessionValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> Result<Actor, AuthError> {
        self.tokens.get(token).cloned().ok_or(AuthError::InvalidToken)
    }
}
