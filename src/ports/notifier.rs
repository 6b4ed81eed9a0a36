//! Notifier Port - Reminder Delivery Interface
//!
//! The reminder scheduler hands due reminders to a notifier. Delivery
//! failures are reported but never block the scheduler: a reminder is
//! marked sent whether or not it reached the user.

use async_trait::async_trait;

use crate::domain::reminder::ReminderRecord;

/// Trait for reminder delivery channels (desktop, log, webhook).
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
  /// Deliver one reminder.
  async fn notify(&self, reminder: &ReminderRecord) -> anyhow::Result<()>;

  /// Whether the channel may deliver at all (permission granted).
  fn is_enabled(&self) -> bool;
}
