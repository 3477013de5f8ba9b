//! SubmitInquiryHandler - patients ask for overseas surgery coordination.

use std::sync::Arc;

use crate::application::handlers::events::publish_after_commit;
use crate::domain::access::Actor;
use crate::domain::foundation::{EventId, ReferenceNumber, SerializableDomainEvent};
use crate::domain::inquiry::{InquiryError, InquirySubmission, SurgeryInquiry, SurgeryInquiryReceived};
use crate::ports::{EventPublisher, InquiryRepository};

pub struct SubmitInquiryHandler {
    repo: Arc<dyn InquiryRepository>,
    publisher: Arc<dyn EventPublisher>,
    number_prefix: String,
}

impl SubmitInquiryHandler {
    pub fn new(
        repo: Arc<dyn InquiryRepository>,
        publisher: Arc<dyn EventPublisher>,
        number_prefix: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            publisher,
            number_prefix: number_prefix.into(),
        }
    }

    /// Open to everyone, including anonymous visitors.
    pub async fn handle(&self, form: InquirySubmission, actor: &Actor) -> Result<SurgeryInquiry, InquiryError> {
        let inquiry = SurgeryInquiry::submit(ReferenceNumber::generate(&self.number_prefix), form)?;

        if let Err(e) = self.repo.save(&inquiry).await {
            tracing::error!(error = %e, "failed to persist surgery inquiry");
            return Err(e.into());
        }
        tracing::info!(
            inquiry_number = %inquiry.inquiry_number,
            surgery_type = %inquiry.surgery_type,
            "surgery inquiry received"
        );

        let event = SurgeryInquiryReceived {
            event_id: EventId::new(),
            inquiry_id: inquiry.id,
            inquiry_number: inquiry.inquiry_number.clone(),
            surgery_type: inquiry.surgery_type.clone(),
            patient_phone: inquiry.patient_phone.clone(),
            received_at: inquiry.created_at,
        }
        .to_envelope()
        .with_user_id(actor.audit_id());
        publish_after_commit(self.publisher.as_ref(), vec![event]).await;

        Ok(inquiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemoryInquiryRepository;
    use crate::domain::inquiry::InquiryStatus;

    fn form() -> InquirySubmission {
        InquirySubmission {
            patient_name: "Musu Kollie".into(),
            patient_phone: "+231770000002".into(),
            surgery_type: "Cardiac bypass".into(),
            medical_condition: "Coronary artery disease".into(),
            budget_range: "$8,000 - $12,000".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn anonymous_submission_is_stored_and_announced() {
        let repo = InMemoryInquiryRepository::new();
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = SubmitInquiryHandler::new(Arc::new(repo.clone()), bus.clone(), "SRG");

        let inquiry = handler.handle(form(), &Actor::anonymous()).await.unwrap();

        assert_eq!(inquiry.status, InquiryStatus::New);
        assert_eq!(inquiry.preferred_hospital_location, "India");
        assert!(inquiry.inquiry_number.as_str().starts_with("SRG-"));
        assert!(repo.find_by_id(&inquiry.id).await.unwrap().is_some());
        assert!(bus.has_event("surgery_inquiry.received.v1"));
    }

    #[tokio::test]
    async fn missing_budget_is_rejected() {
        let repo = InMemoryInquiryRepository::new();
        let handler = SubmitInquiryHandler::new(
            Arc::new(repo.clone()),
            Arc::new(InMemoryEventBus::new()),
            "SRG",
        );
        let mut incomplete = form();
        incomplete.budget_range = String::new();

        let err = handler.handle(incomplete, &Actor::anonymous()).await.unwrap_err();

        assert!(matches!(err, InquiryError::Validation { ref field, .. } if field == "budget_range"));
        assert!(repo.list().await.unwrap().is_empty());
    }
}
