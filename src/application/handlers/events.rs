//! Post-commit event publishing shared by the write handlers.

use crate::domain::foundation::EventEnvelope;
use crate::ports::EventPublisher;

/// Publishes `events` after the write they describe has been persisted.
///
/// A failure is logged and swallowed: the write already happened, and
/// surfacing an error would invite the client to resubmit a booking that
/// exists.
pub(crate) async fn publish_after_commit(publisher: &dyn EventPublisher, events: Vec<EventEnvelope>) {
    if events.is_empty() {
        return;
    }
    let event_types: Vec<String> = events.iter().map(|e| e.event_type.clone()).collect();
    if let Err(e) = publisher.publish_all(events).await {
        tracing::error!(
            error = %e,
            event_types = ?event_types,
            "failed to publish events after commit"
        );
    }
}
