//! Result Sync - Settle Pending Bets from the Match Result Feed
//!
//! Looks up the winner of a bet's event and settles the bet with it. A
//! feed that is down or has no decision yet leaves the bet pending; only
//! ledger rejections (unknown or already settled bet) reach the caller.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::bet::{BetId, BetRecord};
use crate::domain::error::LedgerError;
use crate::ports::result_feed::ResultFeed;
use crate::usecases::bet_tracker::BetTracker;

/// Settles bets from an external result source.
pub struct ResultSync {
  tracker: Arc<BetTracker>,
  feed: Arc<dyn ResultFeed>,
}

impl ResultSync {
  pub fn new(tracker: Arc<BetTracker>, feed: Arc<dyn ResultFeed>) -> Self {
    Self { tracker, feed }
  }

  /// Fetch the result for one bet and settle it.
  ///
  /// Returns `Ok(None)` when no result is available yet or the feed
  /// failed; the bet stays pending.
  ///
  /// # Errors
  /// - `NotFound` when no bet has this id
  /// - `AlreadySettled` when the bet is completed
  #[instrument(skip(self))]
  pub async fn fetch_and_settle(&self, id: BetId) -> Result<Option<BetRecord>, LedgerError> {
    let bet = self
      .tracker
      .get(id)
      .await
      .ok_or(LedgerError::NotFound(id))?;
    if !bet.is_pending() {
      return Err(LedgerError::AlreadySettled(id));
    }

    let result = match self.feed.fetch_result(&bet.event_name).await {
      Ok(Some(result)) => result,
      Ok(None) => {
        info!(event = %bet.event_name, "No result available yet");
        return Ok(None);
      }
      Err(e) => {
        warn!(event = %bet.event_name, error = %e, "Result lookup failed");
        return Ok(None);
      }
    };

    info!(event = %bet.event_name, back_won = result.back_won, "Result received");
    self.tracker.settle(id, result.back_won).await.map(Some)
  }

  /// Try to settle every pending bet. Returns the bets that got settled.
  pub async fn sync_pending(&self) -> Vec<BetRecord> {
    let pending: Vec<BetId> = self
      .tracker
      .bets()
      .await
      .into_iter()
      .filter(BetRecord::is_pending)
      .map(|b| b.id)
      .collect();

    let mut settled = Vec::new();
    for id in pending {
      match self.fetch_and_settle(id).await {
        Ok(Some(bet)) => settled.push(bet),
        Ok(None) => {}
        // Deleted or settled by another caller in the meantime.
        Err(e) => warn!(bet_id = %id, error = %e, "Skipping bet during sync"),
      }
    }

    info!(settled = settled.len(), "Result sync complete");
    settled
  }
}
