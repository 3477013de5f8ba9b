//! File-based ResultStorage adapter
//!
//! Writes result documents under `<base>/<booking_id>/<file_id>-<filename>`.
//! Stands in for the external file store on single-node deployments.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::booking::ResultAttachment;
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, FileId};
use crate::ports::{ResultFile, ResultStorage};

/// Disk-backed store for result documents.
#[derive(Debug, Clone)]
pub struct FileResultStorage {
    base_path: PathBuf,
}

impl FileResultStorage {
    /// # Example
    /// ```ignore
    /// let storage = FileResultStorage::new("./data/results");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn booking_dir(&self, booking_id: &BookingId) -> PathBuf {
        self.base_path.join(booking_id.to_string())
    }

    /// Path a stored file lives at.
    pub fn file_path(&self, booking_id: &BookingId, attachment: &ResultAttachment) -> PathBuf {
        self.booking_dir(booking_id).join(format!(
            "{}-{}",
            attachment.file_id,
            sanitize_filename(&attachment.filename)
        ))
    }

    async fn write_all(
        &self,
        booking_id: &BookingId,
        files: Vec<ResultFile>,
        written: &mut Vec<PathBuf>,
    ) -> Result<Vec<ResultAttachment>, DomainError> {
        let dir = self.booking_dir(booking_id);
        fs::create_dir_all(&dir).await.map_err(|e| io_error("create result directory", e))?;

        let mut attachments = Vec::with_capacity(files.len());
        for file in files {
            let attachment = ResultAttachment {
                file_id: FileId::new(),
                filename: file.filename,
                content_type: file.content_type,
            };
            let path = self.file_path(booking_id, &attachment);
            fs::write(&path, &file.bytes)
                .await
                .map_err(|e| io_error("write result file", e))?;
            written.push(path);
            attachments.push(attachment);
        }
        Ok(attachments)
    }
}

#[async_trait]
impl ResultStorage for FileResultStorage {
    /// All files are written or none are left behind.
    async fn store(
        &self,
        booking_id: &BookingId,
        files: Vec<ResultFile>,
    ) -> Result<Vec<ResultAttachment>, DomainError> {
        let mut written = Vec::new();
        match self.write_all(booking_id, files, &mut written).await {
            Ok(attachments) => {
                tracing::debug!(booking_id = %booking_id, files = attachments.len(), "result files stored");
                Ok(attachments)
            }
            Err(e) => {
                for path in written {
                    if let Err(cleanup) = fs::remove_file(&path).await {
                        tracing::warn!(path = %path.display(), error = %cleanup, "failed to remove partial result file");
                    }
                }
                Err(e)
            }
        }
    }

    async fn discard(
        &self,
        booking_id: &BookingId,
        attachments: &[ResultAttachment],
    ) -> Result<(), DomainError> {
        for attachment in attachments {
            match fs::remove_file(self.file_path(booking_id, attachment)).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(io_error("remove result file", e)),
            }
        }
        tracing::debug!(booking_id = %booking_id, files = attachments.len(), "result files discarded");
        Ok(())
    }
}

fn io_error(action: &str, e: std::io::Error) -> DomainError {
    DomainError::new(ErrorCode::StorageError, format!("Failed to {}: {}", action, e))
}

/// Keeps a filename safe to join onto a directory.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}
