//! Repository Port - Ledger Persistence Interface
//!
//! Defines the trait for durably storing the ledger. Every mutation hands
//! over a full snapshot (last write wins) plus one audit event appended to
//! a JSONL log. The snapshot is re-read at startup to rebuild state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::bet::{BetId, BetRecord, BetType, Outcome};
use crate::domain::ledger::Ledger;
use crate::domain::reminder::ReminderRecord;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: &str = "1";

/// Full ledger state for crash recovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
  /// Version of the snapshot format.
  pub version: String,
  /// When the snapshot was taken.
  pub saved_at: DateTime<Utc>,
  /// Cash balance.
  pub balance: Decimal,
  /// Bets in insertion order.
  pub bets: Vec<BetRecord>,
  /// Scheduled reminders.
  pub reminders: Vec<ReminderRecord>,
}

impl LedgerSnapshot {
  /// Capture the current state of a ledger.
  pub fn capture(ledger: &Ledger, saved_at: DateTime<Utc>) -> Self {
    Self {
      version: SNAPSHOT_VERSION.to_string(),
      saved_at,
      balance: ledger.balance(),
      bets: ledger.bets().to_vec(),
      reminders: ledger.reminders().to_vec(),
    }
  }

  /// Rebuild the ledger this snapshot was taken from.
  pub fn into_ledger(self) -> Ledger {
    Ledger::restore(self.balance, self.bets, self.reminders)
  }
}

/// What happened to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEventKind {
  /// A bet was opened.
  Opened {
    bet_type: BetType,
    back_stake: Decimal,
    expected_result: Decimal,
  },
  /// A bet was settled.
  Settled {
    outcome: Outcome,
    actual_result: Decimal,
  },
  /// A bet was deleted.
  Deleted { refund: Decimal },
}

/// A single audit log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
  /// Bet the event refers to.
  pub bet_id: BetId,
  /// Event name of the bet.
  pub event_name: String,
  /// Balance after the change.
  pub balance_after: Decimal,
  /// Event timestamp.
  pub timestamp: DateTime<Utc>,
  #[serde(flatten)]
  pub kind: LedgerEventKind,
}

/// Trait for ledger persistence providers.
///
/// Implementations must make `save_snapshot` atomic: a reader sees either
/// the previous or the new snapshot, never a partial one.
#[async_trait]
pub trait LedgerRepository: Send + Sync + 'static {
  /// Replace the stored snapshot.
  async fn save_snapshot(&self, snapshot: &LedgerSnapshot) -> anyhow::Result<()>;

  /// Load the stored snapshot, `None` on first start.
  async fn load_snapshot(&self) -> anyhow::Result<Option<LedgerSnapshot>>;

  /// Append an audit event.
  async fn append_event(&self, event: &LedgerEvent) -> anyhow::Result<()>;

  /// Load the audit log in write order.
  async fn load_events(&self) -> anyhow::Result<Vec<LedgerEvent>>;

  /// Check if the repository is healthy (directory writable).
  async fn is_healthy(&self) -> bool;
}
