//! ManageInquiriesHandler - admin view and edits of surgery inquiries.

use std::sync::Arc;

use crate::domain::access::{Action, Actor, RolePermissionGate};
use crate::domain::foundation::InquiryId;
use crate::domain::inquiry::{InquiryError, InquiryUpdate, SurgeryInquiry};
use crate::ports::InquiryRepository;

pub struct ManageInquiriesHandler {
    repo: Arc<dyn InquiryRepository>,
    gate: RolePermissionGate,
}

impl ManageInquiriesHandler {
    pub fn new(repo: Arc<dyn InquiryRepository>, gate: RolePermissionGate) -> Self {
        Self { repo, gate }
    }

    pub async fn list(&self, actor: &Actor) -> Result<Vec<SurgeryInquiry>, InquiryError> {
        self.authorize(actor)?;
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: InquiryId, actor: &Actor) -> Result<SurgeryInquiry, InquiryError> {
        self.authorize(actor)?;
        self.repo.find_by_id(&id).await?.ok_or(InquiryError::NotFound(id))
    }

    pub async fn update(
        &self,
        id: InquiryId,
        update: InquiryUpdate,
        actor: &Actor,
    ) -> Result<SurgeryInquiry, InquiryError> {
        self.authorize(actor)?;
        let mut inquiry = self.repo.find_by_id(&id).await?.ok_or(InquiryError::NotFound(id))?;
        let previous = inquiry.status;
        inquiry.apply(update)?;
        self.repo.update(&inquiry).await?;

        tracing::info!(
            inquiry_number = %inquiry.inquiry_number,
            from = %previous,
            to = %inquiry.status,
            "surgery inquiry updated"
        );
        Ok(inquiry)
    }

    pub async fn delete(&self, id: InquiryId, actor: &Actor) -> Result<(), InquiryError> {
        self.authorize(actor)?;
        if !self.repo.delete(&id).await? {
            return Err(InquiryError::NotFound(id));
        }
        tracing::info!(inquiry_id = %id, deleted_by = %actor.audit_id(), "surgery inquiry deleted");
        Ok(())
    }

    fn authorize(&self, actor: &Actor) -> Result<(), InquiryError> {
        self.gate.require(actor, Action::ManageInquiries).map_err(|denied| {
            tracing::warn!(role = %actor.role, "surgery inquiry access denied");
            denied.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryInquiryRepository;
    use crate::domain::foundation::{ReferenceNumber, UserId};
    use crate::domain::inquiry::{InquiryStatus, InquirySubmission};

    async fn seeded() -> (ManageInquiriesHandler, SurgeryInquiry) {
        let repo = InMemoryInquiryRepository::new();
        let inquiry = SurgeryInquiry::submit(
            ReferenceNumber::generate("SRG"),
            InquirySubmission {
                patient_name: "Musu Kollie".into(),
                patient_phone: "+231770000002".into(),
                surgery_type: "Hip replacement".into(),
                medical_condition: "Avascular necrosis".into(),
                budget_range: "$6,000".into(),
                ..Default::default()
            },
        )
        .unwrap();
        repo.save(&inquiry).await.unwrap();
        (
            ManageInquiriesHandler::new(Arc::new(repo), RolePermissionGate::new()),
            inquiry,
        )
    }

    fn admin() -> Actor {
        Actor::admin(UserId::new("admin-1").unwrap())
    }

    #[tokio::test]
    async fn admin_progresses_an_inquiry() {
        let (handler, inquiry) = seeded().await;

        let updated = handler
            .update(
                inquiry.id,
                InquiryUpdate {
                    status: Some(InquiryStatus::InProgress),
                    hospital_details: Some("Apollo Hospitals, Chennai".into()),
                    estimated_cost: Some("$7,200".into()),
                    ..Default::default()
                },
                &admin(),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, InquiryStatus::InProgress);
        let stored = handler.get(inquiry.id, &admin()).await.unwrap();
        assert_eq!(stored.estimated_cost.as_deref(), Some("$7,200"));
    }

    #[tokio::test]
    async fn completed_inquiry_cannot_reopen() {
        let (handler, inquiry) = seeded().await;
        let complete = InquiryUpdate {
            status: Some(InquiryStatus::Completed),
            ..Default::default()
        };
        handler.update(inquiry.id, complete, &admin()).await.unwrap();

        let reopen = InquiryUpdate {
            status: Some(InquiryStatus::InProgress),
            ..Default::default()
        };
        let err = handler.update(inquiry.id, reopen, &admin()).await.unwrap_err();
        assert!(matches!(err, InquiryError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn sub_admin_has_no_access() {
        let (handler, _) = seeded().await;
        let sub = Actor::sub_admin(UserId::new("sub-1").unwrap());
        assert!(matches!(
            handler.list(&sub).await.unwrap_err(),
            InquiryError::Unauthorized { .. }
        ));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (handler, inquiry) = seeded().await;
        handler.delete(inquiry.id, &admin()).await.unwrap();
        assert_eq!(
            handler.get(inquiry.id, &admin()).await.unwrap_err(),
            InquiryError::NotFound(inquiry.id)
        );
    }
}
