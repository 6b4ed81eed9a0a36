//! Result Feed Port - Match Result Lookup Interface
//!
//! Looks up the winner of an event by name so a pending bet can be
//! settled without manual input. Transport and data source belong to the
//! adapter; the use case only sees "back side won" or "no result yet".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Decided result of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
  /// Whether the selection backed at the bookmaker won.
  pub back_won: bool,
}

/// Trait for match result providers.
#[async_trait]
pub trait ResultFeed: Send + Sync + 'static {
  /// Fetch the result for an event.
  ///
  /// `Ok(None)` when the event is unknown or not yet decided.
  async fn fetch_result(&self, event_name: &str) -> anyhow::Result<Option<MatchResult>>;
}
