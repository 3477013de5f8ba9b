//! UploadResultsHandler - provider staff attach result documents and move
//! the booking to `results_ready`.
//!
//! Permission and status are checked before any file leaves the process.
//! Files go to the `ResultStorage` collaborator first; the references it
//! returns are written together with the status change. If that write
//! fails the stored files are discarded again.

use std::sync::Arc;

use crate::application::handlers::events::publish_after_commit;
use crate::domain::access::Actor;
use crate::domain::booking::{
    Booking, BookingError, BookingStateMachine, ResultAttachment, ResultsUploaded,
};
use crate::domain::foundation::{BookingId, EventId, SerializableDomainEvent};
use crate::ports::{BookingRepository, EventPublisher, ResultFile, ResultStorage};

use super::{load_booking, log_rejection, status_changed};

#[derive(Debug, Clone)]
pub struct UploadResultsCommand {
    pub booking_id: BookingId,
    pub files: Vec<ResultFile>,
}

pub struct UploadResultsHandler {
    repo: Arc<dyn BookingRepository>,
    storage: Arc<dyn ResultStorage>,
    publisher: Arc<dyn EventPublisher>,
    state_machine: BookingStateMachine,
    max_files: usize,
}

impl UploadResultsHandler {
    pub fn new(
        repo: Arc<dyn BookingRepository>,
        storage: Arc<dyn ResultStorage>,
        publisher: Arc<dyn EventPublisher>,
        state_machine: BookingStateMachine,
        max_files: usize,
    ) -> Self {
        Self {
            repo,
            storage,
            publisher,
            state_machine,
            max_files,
        }
    }

    pub async fn handle(&self, cmd: UploadResultsCommand, actor: &Actor) -> Result<Booking, BookingError> {
        let booking_id = cmd.booking_id;
        let result = self.apply(cmd, actor).await;
        if let Err(e) = &result {
            log_rejection(e, &booking_id, actor, "upload_results");
        }
        result
    }

    async fn apply(&self, cmd: UploadResultsCommand, actor: &Actor) -> Result<Booking, BookingError> {
        validate_files(&cmd.files, self.max_files)?;

        let before = load_booking(self.repo.as_ref(), &cmd.booking_id).await?;
        self.state_machine.authorize_results_upload(&before, actor)?;

        let file_count = cmd.files.len();
        let attachments = self.storage.store(&before.id(), cmd.files).await?;
        let after = match self.record(&before, actor, attachments.clone()).await {
            Ok(after) => after,
            Err(e) => {
                if let Err(cleanup) = self.storage.discard(&before.id(), &attachments).await {
                    tracing::warn!(
                        booking_id = %before.id(),
                        error = %cleanup,
                        "failed to discard unreferenced result files"
                    );
                }
                return Err(e);
            }
        };

        tracing::info!(
            booking_number = %after.booking_number(),
            file_count,
            role = %actor.role,
            "results uploaded"
        );

        let uploaded = ResultsUploaded {
            event_id: EventId::new(),
            booking_id: after.id(),
            booking_number: after.booking_number().clone(),
            file_count,
            uploaded_by: actor.audit_id(),
            uploaded_at: after.updated_at(),
        }
        .to_envelope()
        .with_user_id(actor.audit_id());
        publish_after_commit(
            self.publisher.as_ref(),
            vec![uploaded, status_changed(&before, &after, actor)],
        )
        .await;

        Ok(after)
    }

    async fn record(
        &self,
        before: &Booking,
        actor: &Actor,
        attachments: Vec<ResultAttachment>,
    ) -> Result<Booking, BookingError> {
        let update = self
            .state_machine
            .plan_results_ready(before, actor, attachments)?;
        Ok(self.repo.update_status(&update).await?)
    }
}

fn validate_files(files: &[ResultFile], max_files: usize) -> Result<(), BookingError> {
    if files.is_empty() {
        return Err(BookingError::validation("files", "at least one result file is required"));
    }
    if files.len() > max_files {
        return Err(BookingError::validation(
            "files",
            format!("at most {} files may be uploaded at once", max_files),
        ));
    }
    for (index, file) in files.iter().enumerate() {
        if file.filename.trim().is_empty() {
            return Err(BookingError::validation(
                format!("files[{}].filename", index),
                "filename is required",
            ));
        }
        if file.bytes.is_empty() {
            return Err(BookingError::validation(
                format!("files[{}]", index),
                "file is empty",
            ));
        }
    }
    Ok(())
}
