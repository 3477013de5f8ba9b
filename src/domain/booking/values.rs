//! Value objects carried by a booking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{FileId, Money, TestId, ValidationError};

/// How results are delivered to the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    Whatsapp,
    InPerson,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Whatsapp => "whatsapp",
            DeliveryMethod::InPerson => "in_person",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whatsapp" => Ok(DeliveryMethod::Whatsapp),
            "in_person" => Ok(DeliveryMethod::InPerson),
            other => Err(ValidationError::invalid_format(
                "delivery_method",
                format!("unknown delivery method '{}'", other),
            )),
        }
    }
}

/// Contact details of the patient a booking is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDetails {
    name: String,
    phone: String,
    location: String,
    email: Option<String>,
}

impl PatientDetails {
    /// Validates name, phone and location in that order; blank email is
    /// treated as absent.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        location: impl Into<String>,
        email: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = required("patient_name", name.into())?;
        let phone = required("patient_phone", phone.into())?;
        let location = required("patient_location", location.into())?;
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        if let Some(email) = &email {
            if !email.contains('@') {
                return Err(ValidationError::invalid_format("patient_email", "missing '@'"));
            }
        }
        Ok(Self {
            name,
            phone,
            location,
            email,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// One booked test with its unit price in the booking's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingLine {
    pub test_id: TestId,
    pub unit_price: Money,
}

/// Reference to a result document held by the file store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultAttachment {
    pub file_id: FileId,
    pub filename: String,
    pub content_type: String,
}
