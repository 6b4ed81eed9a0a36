//! Repository Implementation - File-backed Ledger Repository
//!
//! Wraps `SnapshotStore` (atomic JSON snapshot) and `EventLog` (JSONL
//! audit trail) into a single struct implementing `LedgerRepository`.
//! The use-case layer only knows the trait, never files or JSON.

use anyhow::Result;
use async_trait::async_trait;

use super::event_log::EventLog;
use super::snapshot::SnapshotStore;
use crate::ports::repository::{LedgerEvent, LedgerRepository, LedgerSnapshot};

/// Concrete repository combining snapshot and audit log persistence.
pub struct RepositoryImpl {
    snapshots: SnapshotStore,
    events: EventLog,
}

impl RepositoryImpl {
    pub fn new(snapshots: SnapshotStore, events: EventLog) -> Self {
        Self { snapshots, events }
    }

    /// Create a repository rooted at `data_dir`, creating it as needed.
    pub async fn from_data_dir(data_dir: &str) -> Result<Self> {
        let snapshots = SnapshotStore::new(data_dir).await?;
        let events = EventLog::new(data_dir).await?;
        Ok(Self::new(snapshots, events))
    }
}

#[async_trait]
impl LedgerRepository for RepositoryImpl {
    async fn save_snapshot(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        self.snapshots.save(snapshot).await
    }

    async fn load_snapshot(&self) -> Result<Option<LedgerSnapshot>> {
        self.snapshots.load().await
    }

    async fn append_event(&self, event: &LedgerEvent) -> Result<()> {
        self.events.append(event).await
    }

    async fn load_events(&self) -> Result<Vec<LedgerEvent>> {
        self.events.load_all().await
    }

    async fn is_healthy(&self) -> bool {
        self.snapshots.is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    use crate::domain::bet::{BetInputs, BetType};
    use crate::ports::repository::LedgerEventKind;
    use crate::usecases::bet_tracker::BetTracker;

    #[tokio::test]
    async fn test_tracker_survives_restart() {
        let dir = std::env::temp_dir()
            .join(format!("mb-repo-{}", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .into_owned();

        let repo = Arc::new(RepositoryImpl::from_data_dir(&dir).await.unwrap());
        let tracker = BetTracker::restore(repo, dec!(500), 30).await.unwrap();
        let opened = tracker
            .open(BetInputs {
                event_name: "Arsenal v Chelsea".to_string(),
                bet_type: BetType::Qualifying,
                bookmaker: "Bonus Bookmaker".to_string(),
                exchange: "Betfair".to_string(),
                back_stake: dec!(25),
                back_odds: dec!(2.5),
                lay_odds: dec!(2.6),
                commission: dec!(2),
                event_time: Some(Utc::now() + Duration::days(1)),
                reminder_minutes: Some(15),
            })
            .await
            .unwrap();
        drop(tracker);

        let repo = Arc::new(RepositoryImpl::from_data_dir(&dir).await.unwrap());
        let events = repo.load_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].kind, LedgerEventKind::Opened { .. }));

        let restored = BetTracker::restore(repo, dec!(500), 30).await.unwrap();
        assert_eq!(restored.balance().await, dec!(475));
        assert_eq!(restored.get(opened.bet.id).await, Some(opened.bet));
        assert_eq!(restored.reminders().await.len(), 1);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
