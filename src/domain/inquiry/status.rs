//! Surgery inquiry status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    #[default]
    New,
    InProgress,
    Completed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::InProgress => "in_progress",
            InquiryStatus::Completed => "completed",
        }
    }
}

impl StateMachine for InquiryStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            InquiryStatus::New => vec![InquiryStatus::InProgress, InquiryStatus::Completed],
            InquiryStatus::InProgress => vec![InquiryStatus::Completed],
            InquiryStatus::Completed => vec![],
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(InquiryStatus::New),
            "in_progress" => Ok(InquiryStatus::InProgress),
            "completed" => Ok(InquiryStatus::Completed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown inquiry status '{}'", other),
            )),
        }
    }
}
