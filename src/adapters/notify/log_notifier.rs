//! Log Notifier - Reminders as Structured Log Lines
//!
//! Emits every reminder as an `info` event on the `reminder` target so
//! log shippers (or a terminal running the service) surface it.

use async_trait::async_trait;
use tracing::info;

use crate::domain::reminder::ReminderRecord;
use crate::ports::notifier::Notifier;

/// Notifier that writes reminders to the tracing pipeline.
#[derive(Debug, Clone, Copy)]
pub struct LogNotifier {
    enabled: bool,
}

impl LogNotifier {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, reminder: &ReminderRecord) -> anyhow::Result<()> {
        info!(
            target: "reminder",
            reminder_id = %reminder.id,
            event = %reminder.event_name,
            fire_at = %reminder.fire_at,
            "{}",
            reminder.message()
        );
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
