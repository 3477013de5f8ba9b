//! Authentication configuration
//!
//! Session issuance is external. The service only resolves bearer tokens
//! to actors, and until an identity provider is wired in it does so from a
//! static table:
//!
//! ```text
//! CHEKUP__AUTH__STATIC_TOKENS="tok-admin:admin:u-1,tok-lab:lab_technician:u-7:<provider uuid>"
//! ```

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

const MIN_PRODUCTION_TOKEN_LEN: usize = 32;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Comma-separated `token:role:user_id[:provider_id]` entries
    pub static_tokens: Option<String>,
}

/// One parsed entry of the static token table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTokenEntry {
    pub token: String,
    pub role: String,
    pub user_id: String,
    pub provider_id: Option<String>,
}

impl AuthConfig {
    /// Parses the static token table.
    pub fn token_entries(&self) -> Result<Vec<StaticTokenEntry>, ValidationError> {
        let Some(raw) = self.static_tokens.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
                match parts.as_slice() {
                    [token, role, user] | [token, role, user, _]
                        if !token.is_empty() && !role.is_empty() && !user.is_empty() =>
                    {
                        Ok(StaticTokenEntry {
                            token: token.to_string(),
                            role: role.to_string(),
                            user_id: user.to_string(),
                            provider_id: parts.get(3).map(|p| p.to_string()),
                        })
                    }
                    // Never echo the token itself.
                    _ => Err(ValidationError::InvalidTokenEntry(format!(
                        "expected token:role:user_id[:provider_id], got {} fields",
                        parts.len()
                    ))),
                }
            })
            .collect()
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let entries = self.token_entries()?;
        if *environment == Environment::Production
            && entries.iter().any(|e| e.token.len() < MIN_PRODUCTION_TOKEN_LEN)
        {
            return Err(ValidationError::WeakTokenInProduction);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_entries_with_and_without_provider() {
        let config = AuthConfig {
            static_tokens: Some("a:admin:u-1, b:clinic:u-2:p-9".to_string()),
        };
        let entries = config.token_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].provider_id, None);
        assert_eq!(entries[1].role, "clinic");
        assert_eq!(entries[1].provider_id.as_deref(), Some("p-9"));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let config = AuthConfig {
            static_tokens: Some("a:admin".to_string()),
        };
        assert!(matches!(
            config.token_entries(),
            Err(ValidationError::InvalidTokenEntry(_))
        ));
    }

    #[test]
    fn test_short_tokens_rejected_in_production() {
        let config = AuthConfig {
            static_tokens: Some("short:admin:u-1".to_string()),
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::WeakTokenInProduction)
        );
    }

    #[test]
    fn test_no_tokens_is_valid() {
        assert!(AuthConfig::default().token_entries().unwrap().is_empty());
    }
}
