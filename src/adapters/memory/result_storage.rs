//! In-memory ResultStorage. Keeps the bytes so tests can assert on them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::ResultAttachment;
use crate::domain::foundation::{BookingId, DomainError, FileId};
use crate::ports::{ResultFile, ResultStorage};

#[derive(Debug, Clone, Default)]
pub struct InMemoryResultStorage {
    files: Arc<RwLock<HashMap<FileId, (BookingId, ResultFile)>>>,
}

impl InMemoryResultStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files stored for a booking.
    pub async fn files_for(&self, booking_id: &BookingId) -> Vec<ResultFile> {
        self.files
            .read()
            .await
            .values()
            .filter(|(owner, _)| owner == booking_id)
            .map(|(_, file)| file.clone())
            .collect()
    }
}

#[async_trait]
impl ResultStorage for InMemoryResultStorage {
    async fn store(
        &self,
        booking_id: &BookingId,
        files: Vec<ResultFile>,
    ) -> Result<Vec<ResultAttachment>, DomainError> {
        let mut stored = self.files.write().await;
        let mut attachments = Vec::with_capacity(files.len());
        for file in files {
            let file_id = FileId::new();
            attachments.push(ResultAttachment {
                file_id,
                filename: file.filename.clone(),
                content_type: file.content_type.clone(),
            });
            stored.insert(file_id, (*booking_id, file));
        }
        Ok(attachments)
    }

    async fn discard(
        &self,
        booking_id: &BookingId,
        attachments: &[ResultAttachment],
    ) -> Result<(), DomainError> {
        let mut stored = self.files.write().await;
        for attachment in attachments {
            if matches!(stored.get(&attachment.file_id), Some((owner, _)) if owner == booking_id) {
                stored.remove(&attachment.file_id);
            }
        }
        Ok(())
    }
}
