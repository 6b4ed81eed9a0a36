//! Reminder Scheduler - Periodic Delivery of Event Reminders
//!
//! Wakes every `check_interval` and hands every due reminder to the
//! notifier. Reminders are marked sent before delivery, so a failing
//! channel never causes the same reminder to fire twice.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use crate::ports::notifier::Notifier;
use crate::usecases::bet_tracker::BetTracker;

/// Delivers due reminders on a fixed cadence.
pub struct ReminderScheduler {
  tracker: Arc<BetTracker>,
  notifier: Arc<dyn Notifier>,
  check_interval: Duration,
}

impl ReminderScheduler {
  pub fn new(
    tracker: Arc<BetTracker>,
    notifier: Arc<dyn Notifier>,
    check_interval: Duration,
  ) -> Self {
    Self {
      tracker,
      notifier,
      check_interval,
    }
  }

  /// Run the scheduler loop until shutdown.
  ///
  /// Performs one check immediately so reminders that came due while
  /// the process was down are delivered at startup.
  #[instrument(skip(self, shutdown_rx))]
  pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
    info!(
      interval_secs = self.check_interval.as_secs(),
      notifier_enabled = self.notifier.is_enabled(),
      "Reminder scheduler started"
    );

    self.tick(Utc::now()).await;

    loop {
      tokio::select! {
        biased;
        _ = shutdown_rx.recv() => {
          info!("Reminder scheduler shutting down");
          return Ok(());
        }
        () = tokio::time::sleep(self.check_interval) => {
          self.tick(Utc::now()).await;
        }
      }
    }
  }

  /// Deliver every reminder due at `now`.
  ///
  /// Returns how many reminders came due.
  pub async fn tick(&self, now: DateTime<Utc>) -> usize {
    let due = self.tracker.take_due_reminders(now).await;
    if due.is_empty() {
      debug!("No reminders due");
      return 0;
    }

    if !self.notifier.is_enabled() {
      info!(count = due.len(), "Notifications disabled, reminders marked sent");
      return due.len();
    }

    for reminder in &due {
      match self.notifier.notify(reminder).await {
        Ok(()) => {
          debug!(reminder_id = %reminder.id, event = %reminder.event_name, "Reminder delivered");
        }
        Err(e) => {
          warn!(
            reminder_id = %reminder.id,
            event = %reminder.event_name,
            error = %e,
            "Reminder delivery failed"
          );
        }
      }
    }

    due.len()
  }
}
