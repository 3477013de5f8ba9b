//! HTTP DTOs for surgery inquiries. Responses serialize `SurgeryInquiry`
//! directly.

use serde::Deserialize;

use crate::domain::inquiry::{InquiryStatus, InquirySubmission, InquiryUpdate};

/// Public inquiry form.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitInquiryRequest {
    pub patient_name: String,
    pub patient_phone: String,
    #[serde(default)]
    pub patient_email: Option<String>,
    pub surgery_type: String,
    pub medical_condition: String,
    #[serde(default)]
    pub preferred_hospital_location: Option<String>,
    pub budget_range: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Reference to an uploaded report, if the patient attached one.
    #[serde(default)]
    pub medical_report: Option<String>,
}

impl From<SubmitInquiryRequest> for InquirySubmission {
    fn from(request: SubmitInquiryRequest) -> Self {
        Self {
            patient_name: request.patient_name,
            patient_phone: request.patient_phone,
            patient_email: request.patient_email,
            surgery_type: request.surgery_type,
            medical_condition: request.medical_condition,
            preferred_hospital_location: request.preferred_hospital_location,
            budget_range: request.budget_range,
            notes: request.notes,
            medical_report: request.medical_report,
        }
    }
}

/// Admin edit. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInquiryRequest {
    #[serde(default)]
    pub status: Option<InquiryStatus>,
    #[serde(default)]
    pub hospital_details: Option<String>,
    #[serde(default)]
    pub accommodation_details: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<UpdateInquiryRequest> for InquiryUpdate {
    fn from(request: UpdateInquiryRequest) -> Self {
        Self {
            status: request.status,
            hospital_details: request.hospital_details,
            accommodation_details: request.accommodation_details,
            estimated_cost: request.estimated_cost,
            notes: request.notes,
        }
    }
}
