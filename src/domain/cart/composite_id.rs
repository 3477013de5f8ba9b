//! Key that identifies one (test, provider) pair inside a cart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ProviderId, TestId, ValidationError};

/// `"{test_id}_{provider_id}"`.
///
/// UUIDs never contain `_`, so the split is unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompositeId {
    test_id: TestId,
    provider_id: ProviderId,
}

impl CompositeId {
    pub fn new(test_id: TestId, provider_id: ProviderId) -> Self {
        Self { test_id, provider_id }
    }

    pub fn test_id(&self) -> TestId {
        self.test_id
    }

    pub fn provider_id(&self) -> ProviderId {
        self.provider_id
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.test_id, self.provider_id)
    }
}

impl FromStr for CompositeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (test, provider) = s.split_once('_').ok_or_else(|| {
            ValidationError::invalid_format("composite_id", "expected '<test_id>_<provider_id>'")
        })?;
        let test_id = test
            .parse::<TestId>()
            .map_err(|e| ValidationError::invalid_format("composite_id", e.to_string()))?;
        let provider_id = provider
            .parse::<ProviderId>()
            .map_err(|e| ValidationError::invalid_format("composite_id", e.to_string()))?;
        Ok(Self::new(test_id, provider_id))
    }
}

impl TryFrom<String> for CompositeId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompositeId> for String {
    fn from(id: CompositeId) -> Self {
        id.to_string()
    }
}
