//! Snapshot Store - Atomic JSON Ledger Persistence
//!
//! Saves ledger snapshots to `ledger.json` using atomic writes
//! (write to tmp file, then rename). A crash mid-write leaves the
//! previous snapshot in place.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::ports::repository::LedgerSnapshot;

/// Atomic JSON snapshot store.
pub struct SnapshotStore {
    /// Path to ledger.json.
    snapshot_path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
}

impl SnapshotStore {
    /// Create a snapshot store in the given data directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub async fn new(data_dir: &str) -> Result<Self> {
        let dir = Path::new(data_dir);
        fs::create_dir_all(dir)
            .await
            .context("Failed to create data directory")?;

        Ok(Self {
            snapshot_path: dir.join("ledger.json"),
            tmp_path: dir.join("ledger.json.tmp"),
        })
    }

    /// Save a snapshot atomically (tmp, then rename).
    #[instrument(skip(self, snapshot))]
    pub async fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .context("Failed to serialize ledger snapshot")?;

        fs::write(&self.tmp_path, &json)
            .await
            .context("Failed to write tmp snapshot file")?;

        fs::rename(&self.tmp_path, &self.snapshot_path)
            .await
            .context("Failed to rename snapshot file")?;

        debug!(
            path = %self.snapshot_path.display(),
            bets = snapshot.bets.len(),
            balance = %snapshot.balance,
            "Ledger snapshot saved"
        );

        Ok(())
    }

    /// Load the stored snapshot.
    ///
    /// Returns `None` if no snapshot exists (first startup).
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Option<LedgerSnapshot>> {
        if !self.snapshot_path.exists() {
            info!("No ledger snapshot found, starting fresh");
            return Ok(None);
        }

        let json = fs::read_to_string(&self.snapshot_path)
            .await
            .context("Failed to read snapshot file")?;

        let snapshot: LedgerSnapshot =
            serde_json::from_str(&json).context("Failed to parse snapshot JSON")?;

        info!(
            version = %snapshot.version,
            saved_at = %snapshot.saved_at,
            bets = snapshot.bets.len(),
            "Ledger snapshot loaded"
        );

        Ok(Some(snapshot))
    }

    /// Check that the data directory accepts writes.
    pub async fn is_healthy(&self) -> bool {
        let Some(dir) = self.snapshot_path.parent() else {
            return false;
        };
        let probe = dir.join(".health_check");
        let result = fs::write(&probe, b"ok").await;
        let _ = fs::remove_file(&probe).await;
        result.is_ok()
    }
}
