//! Event bus adapters.
//!
//! - `InMemoryEventBus` - in-process publish/subscribe
//! - `NotificationLogger` - logs the notifications the messaging
//!   collaborator would send

mod in_memory;
mod notification_log;

pub use in_memory::InMemoryEventBus;
pub use notification_log::NotificationLogger;
