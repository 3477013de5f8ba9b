//! Human-readable reference numbers (e.g. `CHK-3F9A01BC`).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

const CODE_LEN: usize = 8;

/// `PREFIX-XXXXXXXX` where the suffix is eight upper-case hex digits taken
/// from a random UUID. Never derived from a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceNumber(String);

impl ReferenceNumber {
    /// Generates a fresh reference with the given prefix.
    pub fn generate(prefix: &str) -> Self {
        let hex = Uuid::new_v4().simple().to_string().to_uppercase();
        Self(format!("{}-{}", prefix, &hex[..CODE_LEN]))
    }

    /// Parses a stored reference, checking its shape.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let valid = value
            .rsplit_once('-')
            .map(|(prefix, code)| {
                !prefix.is_empty()
                    && code.len() == CODE_LEN
                    && code.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
            })
            .unwrap_or(false);
        if !valid {
            return Err(ValidationError::invalid_format(
                "reference_number",
                format!("'{}' is not PREFIX-XXXXXXXX", value),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
