//! Surgery inquiry repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InquiryId};
use crate::domain::inquiry::SurgeryInquiry;

#[async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn save(&self, inquiry: &SurgeryInquiry) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `InquiryNotFound` if the inquiry doesn't exist
    async fn update(&self, inquiry: &SurgeryInquiry) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &InquiryId) -> Result<Option<SurgeryInquiry>, DomainError>;

    /// Newest first.
    async fn list(&self) -> Result<Vec<SurgeryInquiry>, DomainError>;

    async fn delete(&self, id: &InquiryId) -> Result<bool, DomainError>;
}
