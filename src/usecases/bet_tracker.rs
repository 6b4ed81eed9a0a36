//! Bet Tracker Use Case - Serialized Ledger Access with Persistence
//!
//! Owns the ledger behind a single-writer mutex. Every open, settle and
//! delete runs to completion under the lock, including handing the
//! resulting snapshot and audit event to the repository, so concurrent
//! callers (HTTP handlers, the reminder scheduler, result sync) never
//! interleave mutations.
//!
//! Persistence failures are logged and swallowed: the in-memory ledger
//! stays the source of truth for the running session.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::bet::{BetId, BetInputs, BetRecord, Outcome};
use crate::domain::error::LedgerError;
use crate::domain::ledger::{DeletedBet, Ledger, LedgerSummary, OpenedBet};
use crate::domain::reminder::ReminderRecord;
use crate::ports::repository::{
  LedgerEvent, LedgerEventKind, LedgerRepository, LedgerSnapshot,
};

/// Shared, persisted bet ledger.
pub struct BetTracker {
  ledger: Mutex<Ledger>,
  repo: Arc<dyn LedgerRepository>,
  /// Reminder lead applied when a bet does not carry its own.
  default_lead_minutes: u32,
}

impl BetTracker {
  /// Create a tracker around an existing ledger.
  pub fn new(
    ledger: Ledger,
    repo: Arc<dyn LedgerRepository>,
    default_lead_minutes: u32,
  ) -> Self {
    Self {
      ledger: Mutex::new(ledger),
      repo,
      default_lead_minutes,
    }
  }

  /// Rebuild the tracker from the last stored snapshot.
  ///
  /// Starts an empty ledger with `initial_balance` when nothing is stored.
  ///
  /// # Errors
  /// Fails when the stored snapshot exists but cannot be read.
  pub async fn restore(
    repo: Arc<dyn LedgerRepository>,
    initial_balance: Decimal,
    default_lead_minutes: u32,
  ) -> Result<Self> {
    let ledger = match repo
      .load_snapshot()
      .await
      .context("Failed to load ledger snapshot")?
    {
      Some(snapshot) => {
        info!(
          bets = snapshot.bets.len(),
          reminders = snapshot.reminders.len(),
          balance = %snapshot.balance,
          "Ledger restored from snapshot"
        );
        snapshot.into_ledger()
      }
      None => {
        info!(balance = %initial_balance, "Starting fresh ledger");
        Ledger::new(initial_balance)
      }
    };

    Ok(Self::new(ledger, repo, default_lead_minutes))
  }

  /// Open a bet and persist the result.
  ///
  /// # Errors
  /// Any rejection from [`Ledger::open`]; nothing is persisted then.
  pub async fn open(&self, mut inputs: BetInputs) -> Result<OpenedBet, LedgerError> {
    inputs.reminder_minutes.get_or_insert(self.default_lead_minutes);

    let mut ledger = self.ledger.lock().await;
    let now = Utc::now();
    let opened = ledger.open(inputs, now)?;

    info!(
      bet_id = %opened.bet.id,
      event = %opened.bet.event_name,
      bet_type = %opened.bet.bet_type,
      lay_stake = %opened.bet.lay_stake,
      expected = %opened.bet.expected_result,
      balance = %opened.balance_after,
      "Bet opened"
    );
    if let Some(ref r) = opened.reminder {
      info!(event = %r.event_name, fire_at = %r.fire_at, "Reminder scheduled");
    }

    let event = LedgerEvent {
      bet_id: opened.bet.id,
      event_name: opened.bet.event_name.clone(),
      balance_after: opened.balance_after,
      timestamp: now,
      kind: LedgerEventKind::Opened {
        bet_type: opened.bet.bet_type,
        back_stake: opened.bet.back_stake,
        expected_result: opened.bet.expected_result,
      },
    };
    self.persist(&ledger, Some(event), now).await;

    Ok(opened)
  }

  /// Settle a pending bet and persist the result.
  ///
  /// # Errors
  /// `NotFound` or `AlreadySettled` from [`Ledger::settle`].
  pub async fn settle(&self, id: BetId, back_won: bool) -> Result<BetRecord, LedgerError> {
    let mut ledger = self.ledger.lock().await;
    let now = Utc::now();
    let bet = ledger.settle(id, back_won, now).inspect_err(|e| {
      warn!(bet_id = %id, error = %e, "Settle rejected");
    })?;

    let outcome = Outcome::from_back_won(back_won);
    let actual_result = bet
      .actual_result()
      .unwrap_or_else(|| bet.expected_profit(outcome));

    info!(
      bet_id = %id,
      event = %bet.event_name,
      outcome = ?outcome,
      result = %actual_result,
      balance = %ledger.balance(),
      "Bet settled"
    );

    let event = LedgerEvent {
      bet_id: id,
      event_name: bet.event_name.clone(),
      balance_after: ledger.balance(),
      timestamp: now,
      kind: LedgerEventKind::Settled {
        outcome,
        actual_result,
      },
    };
    self.persist(&ledger, Some(event), now).await;

    Ok(bet)
  }

  /// Delete a bet and persist the result.
  ///
  /// # Errors
  /// `NotFound` from [`Ledger::delete`].
  pub async fn delete(&self, id: BetId) -> Result<DeletedBet, LedgerError> {
    let mut ledger = self.ledger.lock().await;
    let now = Utc::now();
    let deleted = ledger.delete(id)?;

    info!(
      bet_id = %id,
      event = %deleted.bet.event_name,
      refund = %deleted.refund,
      reminders_removed = deleted.reminders_removed,
      balance = %deleted.balance_after,
      "Bet deleted"
    );

    let event = LedgerEvent {
      bet_id: id,
      event_name: deleted.bet.event_name.clone(),
      balance_after: deleted.balance_after,
      timestamp: now,
      kind: LedgerEventKind::Deleted {
        refund: deleted.refund,
      },
    };
    self.persist(&ledger, Some(event), now).await;

    Ok(deleted)
  }

  /// Mark due reminders as sent and return them for delivery.
  pub async fn take_due_reminders(&self, now: DateTime<Utc>) -> Vec<ReminderRecord> {
    let mut ledger = self.ledger.lock().await;
    let due = ledger.take_due_reminders(now);
    if !due.is_empty() {
      self.persist(&ledger, None, now).await;
    }
    due
  }

  /// All bets in insertion order.
  pub async fn bets(&self) -> Vec<BetRecord> {
    self.ledger.lock().await.bets().to_vec()
  }

  pub async fn get(&self, id: BetId) -> Option<BetRecord> {
    self.ledger.lock().await.get(id).cloned()
  }

  pub async fn reminders(&self) -> Vec<ReminderRecord> {
    self.ledger.lock().await.reminders().to_vec()
  }

  pub async fn balance(&self) -> Decimal {
    self.ledger.lock().await.balance()
  }

  pub async fn summary(&self) -> LedgerSummary {
    self.ledger.lock().await.summary(Utc::now())
  }

  /// The audit log, oldest first.
  ///
  /// # Errors
  /// Fails when the repository cannot read the log.
  pub async fn events(&self) -> Result<Vec<LedgerEvent>> {
    self.repo.load_events().await.context("Failed to load ledger events")
  }

  /// Whether the underlying repository can be written.
  pub async fn is_healthy(&self) -> bool {
    self.repo.is_healthy().await
  }

  /// Hand the snapshot (and audit event) to the repository.
  async fn persist(&self, ledger: &Ledger, event: Option<LedgerEvent>, now: DateTime<Utc>) {
    let snapshot = LedgerSnapshot::capture(ledger, now);
    if let Err(e) = self.repo.save_snapshot(&snapshot).await {
      warn!(error = %e, "Failed to save ledger snapshot, keeping in-memory state");
    }
    if let Some(event) = event {
      if let Err(e) = self.repo.append_event(&event).await {
        warn!(bet_id = %event.bet_id, error = %e, "Failed to append ledger event");
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Mutex as StdMutex;

  use async_trait::async_trait;
  use rust_decimal_macros::dec;

  use crate::domain::bet::BetType;

  /// Repository that records every call in memory.
  #[derive(Default)]
  struct MemoryRepo {
    snapshot: StdMutex<Option<LedgerSnapshot>>,
    events: StdMutex<Vec<LedgerEvent>>,
    fail_writes: bool,
  }

  #[async_trait]
  impl LedgerRepository for MemoryRepo {
    async fn save_snapshot(&self, snapshot: &LedgerSnapshot) -> anyhow::Result<()> {
      anyhow::ensure!(!self.fail_writes, "disk full");
      *self.snapshot.lock().unwrap() = Some(snapshot.clone());
      Ok(())
    }

    async fn load_snapshot(&self) -> anyhow::Result<Option<LedgerSnapshot>> {
      Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn append_event(&self, event: &LedgerEvent) -> anyhow::Result<()> {
      anyhow::ensure!(!self.fail_writes, "disk full");
      self.events.lock().unwrap().push(event.clone());
      Ok(())
    }

    async fn load_events(&self) -> anyhow::Result<Vec<LedgerEvent>> {
      Ok(self.events.lock().unwrap().clone())
    }

    async fn is_healthy(&self) -> bool {
      !self.fail_writes
    }
  }

  fn qualifying(event: &str) -> BetInputs {
    BetInputs {
      event_name: event.to_string(),
      bet_type: BetType::Qualifying,
      bookmaker: "Bonus Bookmaker".to_string(),
      exchange: "Betfair".to_string(),
      back_stake: dec!(10),
      back_odds: dec!(2.0),
      lay_odds: dec!(2.1),
      commission: dec!(2),
      event_time: Some(Utc::now() + chrono::Duration::hours(4)),
      reminder_minutes: None,
    }
  }

  #[tokio::test]
  async fn test_open_persists_snapshot_and_event() {
    let repo = Arc::new(MemoryRepo::default());
    let tracker = BetTracker::new(Ledger::new(dec!(100)), repo.clone(), 30);

    let opened = tracker.open(qualifying("A v B")).await.unwrap();
    let reminder = opened.reminder.expect("default lead applied");
    assert_eq!(reminder.minutes_before, 30);

    let snapshot = repo.snapshot.lock().unwrap().clone().unwrap();
    assert_eq!(snapshot.balance, dec!(90));
    assert_eq!(snapshot.bets.len(), 1);
    assert_eq!(snapshot.reminders.len(), 1);

    let events = repo.events.lock().unwrap().clone();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0].kind, LedgerEventKind::Opened { .. }));
  }

  #[tokio::test]
  async fn test_restore_round_trip() {
    let repo = Arc::new(MemoryRepo::default());
    let tracker = BetTracker::new(Ledger::new(dec!(100)), repo.clone(), 30);
    let bet = tracker.open(qualifying("A v B")).await.unwrap().bet;
    tracker.settle(bet.id, false).await.unwrap();
    let expected_balance = tracker.balance().await;

    let restored = BetTracker::restore(repo, dec!(5000), 30).await.unwrap();
    assert_eq!(restored.balance().await, expected_balance);
    assert_eq!(restored.bets().await.len(), 1);
    assert!(!restored.get(bet.id).await.unwrap().is_pending());
  }

  #[tokio::test]
  async fn test_restore_without_snapshot_uses_initial_balance() {
    let repo = Arc::new(MemoryRepo::default());
    let tracker = BetTracker::restore(repo, dec!(1000), 30).await.unwrap();
    assert_eq!(tracker.balance().await, dec!(1000));
    assert!(tracker.bets().await.is_empty());
  }

  #[tokio::test]
  async fn test_persistence_failure_keeps_state() {
    let repo = Arc::new(MemoryRepo {
      fail_writes: true,
      ..MemoryRepo::default()
    });
    let tracker = BetTracker::new(Ledger::new(dec!(100)), repo, 30);
    let bet = tracker.open(qualifying("A v B")).await.unwrap().bet;
    assert_eq!(tracker.balance().await, dec!(90));
    assert!(tracker.get(bet.id).await.is_some());
    assert!(!tracker.is_healthy().await);
  }

  #[tokio::test]
  async fn test_rejected_settle_writes_nothing() {
    let repo = Arc::new(MemoryRepo::default());
    let tracker = BetTracker::new(Ledger::new(dec!(100)), repo.clone(), 30);
    let bet = tracker.open(qualifying("A v B")).await.unwrap().bet;
    tracker.settle(bet.id, true).await.unwrap();

    let err = tracker.settle(bet.id, false).await.unwrap_err();
    assert_eq!(err, LedgerError::AlreadySettled(bet.id));
    assert_eq!(repo.events.lock().unwrap().len(), 2);
  }
}
