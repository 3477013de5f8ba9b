//! In-memory InquiryRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, InquiryId};
use crate::domain::inquiry::SurgeryInquiry;
use crate::ports::InquiryRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryInquiryRepository {
    inquiries: Arc<RwLock<HashMap<InquiryId, SurgeryInquiry>>>,
}

impl InMemoryInquiryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InquiryRepository for InMemoryInquiryRepository {
    async fn save(&self, inquiry: &SurgeryInquiry) -> Result<(), DomainError> {
        let mut stored = self.inquiries.write().await;
        if stored.contains_key(&inquiry.id) {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("Inquiry {} already exists", inquiry.inquiry_number),
            ));
        }
        stored.insert(inquiry.id, inquiry.clone());
        Ok(())
    }

    async fn update(&self, inquiry: &SurgeryInquiry) -> Result<(), DomainError> {
        let mut stored = self.inquiries.write().await;
        match stored.get_mut(&inquiry.id) {
            Some(existing) => {
                *existing = inquiry.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::InquiryNotFound,
                format!("Inquiry not found: {}", inquiry.id),
            )
            .with_detail("id", inquiry.id.to_string())),
        }
    }

    async fn find_by_id(&self, id: &InquiryId) -> Result<Option<SurgeryInquiry>, DomainError> {
        Ok(self.inquiries.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<SurgeryInquiry>, DomainError> {
        let mut all: Vec<SurgeryInquiry> = self.inquiries.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn delete(&self, id: &InquiryId) -> Result<bool, DomainError> {
        Ok(self.inquiries.write().await.remove(id).is_some())
    }
}
