//! Event Log - Append-only JSONL Ledger Audit Trail
//!
//! Every ledger mutation is appended to `events.jsonl` as one
//! self-contained JSON line. The file is never rewritten, so it doubles
//! as a history of the balance alongside the snapshot.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

use crate::ports::repository::LedgerEvent;

/// Append-only JSONL ledger event log.
pub struct EventLog {
    /// Path to events.jsonl.
    path: PathBuf,
}

impl EventLog {
    /// Create an event log in the given data directory.
    pub async fn new(data_dir: &str) -> Result<Self> {
        let dir = Path::new(data_dir);
        fs::create_dir_all(dir)
            .await
            .context("Failed to create data directory")?;

        Ok(Self {
            path: dir.join("events.jsonl"),
        })
    }

    /// Append one event.
    #[instrument(skip(self, event), fields(bet_id = %event.bet_id))]
    pub async fn append(&self, event: &LedgerEvent) -> Result<()> {
        let mut json =
            serde_json::to_string(event).context("Failed to serialize ledger event")?;
        json.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .context("Failed to open event log")?;

        file.write_all(json.as_bytes())
            .await
            .context("Failed to write ledger event")?;

        file.flush().await.context("Failed to flush event log")?;

        Ok(())
    }

    /// Load all events in write order, skipping malformed lines.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> Result<Vec<LedgerEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .context("Failed to read event log")?;

        let mut events = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<LedgerEvent>(line) {
                Ok(event) => events.push(event),
                Err(e) => {
                    warn!(
                        file = %self.path.display(),
                        error = %e,
                        "Skipping malformed ledger event"
                    );
                }
            }
        }

        info!(count = events.len(), "Loaded ledger events");
        Ok(events)
    }
}
