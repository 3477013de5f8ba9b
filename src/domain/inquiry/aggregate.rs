//! Surgery inquiry aggregate.

use serde::{Deserialize, Serialize};

use super::{InquiryError, InquiryStatus};
use crate::domain::foundation::{InquiryId, ReferenceNumber, StateMachine, Timestamp};

const DEFAULT_HOSPITAL_LOCATION: &str = "India";

/// What a patient submits.
#[derive(Debug, Clone, Default)]
pub struct InquirySubmission {
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_email: Option<String>,
    pub surgery_type: String,
    pub medical_condition: String,
    pub preferred_hospital_location: Option<String>,
    pub budget_range: String,
    pub notes: Option<String>,
    /// Reference to a report already held by the file store.
    pub medical_report: Option<String>,
}

/// Staff edits. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct InquiryUpdate {
    pub status: Option<InquiryStatus>,
    pub hospital_details: Option<String>,
    pub accommodation_details: Option<String>,
    pub estimated_cost: Option<String>,
    pub notes: Option<String>,
}

/// A request for overseas surgery coordination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeryInquiry {
    pub id: InquiryId,
    pub inquiry_number: ReferenceNumber,
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_email: Option<String>,
    pub surgery_type: String,
    pub medical_condition: String,
    pub preferred_hospital_location: String,
    pub budget_range: String,
    pub notes: Option<String>,
    pub medical_report: Option<String>,
    pub hospital_details: Option<String>,
    pub accommodation_details: Option<String>,
    pub estimated_cost: Option<String>,
    pub status: InquiryStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SurgeryInquiry {
    pub fn submit(number: ReferenceNumber, form: InquirySubmission) -> Result<Self, InquiryError> {
        let patient_name = required("patient_name", form.patient_name)?;
        let patient_phone = required("patient_phone", form.patient_phone)?;
        let surgery_type = required("surgery_type", form.surgery_type)?;
        let medical_condition = required("medical_condition", form.medical_condition)?;
        let budget_range = required("budget_range", form.budget_range)?;

        let now = Timestamp::now();
        Ok(Self {
            id: InquiryId::new(),
            inquiry_number: number,
            patient_name,
            patient_phone,
            patient_email: optional(form.patient_email),
            surgery_type,
            medical_condition,
            preferred_hospital_location: optional(form.preferred_hospital_location)
                .unwrap_or_else(|| DEFAULT_HOSPITAL_LOCATION.to_string()),
            budget_range,
            notes: optional(form.notes),
            medical_report: optional(form.medical_report),
            hospital_details: None,
            accommodation_details: None,
            estimated_cost: None,
            status: InquiryStatus::New,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies staff edits. A status change must follow the inquiry graph;
    /// repeating the current status is accepted as a no-op.
    pub fn apply(&mut self, update: InquiryUpdate) -> Result<(), InquiryError> {
        if let Some(target) = update.status {
            if target != self.status {
                if !self.status.can_transition_to(&target) {
                    return Err(InquiryError::InvalidTransition {
                        from: self.status,
                        to: target,
                    });
                }
                self.status = target;
            }
        }
        if let Some(v) = update.hospital_details {
            self.hospital_details = Some(v);
        }
        if let Some(v) = update.accommodation_details {
            self.accommodation_details = Some(v);
        }
        if let Some(v) = update.estimated_cost {
            self.estimated_cost = Some(v);
        }
        if let Some(v) = update.notes {
            self.notes = Some(v);
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

fn required(field: &str, value: String) -> Result<String, InquiryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InquiryError::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> InquirySubmission {
        InquirySubmission {
            patient_name: "Musu Kollie".to_string(),
            patient_phone: "+231880000000".to_string(),
            surgery_type: "Cardiac bypass".to_string(),
            medical_condition: "Coronary artery disease".to_string(),
            budget_range: "$5,000 - $10,000".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn submit_defaults_location_and_status() {
        let inquiry = SurgeryInquiry::submit(ReferenceNumber::generate("SRG"), form()).unwrap();
        assert_eq!(inquiry.status, InquiryStatus::New);
        assert_eq!(inquiry.preferred_hospital_location, "India");
        assert!(inquiry.inquiry_number.as_str().starts_with("SRG-"));
    }

    #[test]
    fn submit_requires_core_fields() {
        let mut f = form();
        f.surgery_type = "  ".to_string();
        let err = SurgeryInquiry::submit(ReferenceNumber::generate("SRG"), f).unwrap_err();
        assert!(matches!(err, InquiryError::Validation { ref field, .. } if field == "surgery_type"));
    }

    #[test]
    fn apply_follows_status_graph() {
        let mut inquiry = SurgeryInquiry::submit(ReferenceNumber::generate("SRG"), form()).unwrap();
        inquiry
            .apply(InquiryUpdate {
                status: Some(InquiryStatus::Completed),
                estimated_cost: Some("$7,500".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(inquiry.status, InquiryStatus::Completed);
        assert_eq!(inquiry.estimated_cost.as_deref(), Some("$7,500"));

        let err = inquiry
            .apply(InquiryUpdate {
                status: Some(InquiryStatus::InProgress),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, InquiryError::InvalidTransition { .. }));
    }
}
