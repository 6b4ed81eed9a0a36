//! Bet ledger entities.
//!
//! Defines the bet types, the lifecycle status of a bet, and the
//! `BetRecord` row stored in the ledger. Inputs and the calculator output
//! are frozen into the record at creation; only the status changes later.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::staking::{StakingInput, StakingResult};

/// Opaque identifier of a bet in the ledger.
pub type BetId = Uuid;

/// Wagering regime of a matched bet.
///
/// Each variant owns its own staking formula in `domain::staking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BetType {
    /// Cash back bet placed to unlock a bookmaker bonus.
    Qualifying,
    /// Free bet whose stake is not returned with the winnings.
    FreeSnr,
    /// Free bet whose stake is returned with the winnings.
    FreeSr,
}

impl BetType {
    /// All bet types, in form order.
    pub const ALL: [Self; 3] = [Self::Qualifying, Self::FreeSnr, Self::FreeSr];

    /// Whether opening a bet of this type reserves cash from the balance.
    ///
    /// Free bets use a promotional stake, so only qualifying bets debit.
    pub const fn uses_cash_stake(self) -> bool {
        matches!(self, Self::Qualifying)
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Qualifying => "Qualifying Bet",
            Self::FreeSnr => "Free Bet (SNR)",
            Self::FreeSr => "Free Bet (SR)",
        }
    }
}

impl std::fmt::Display for BetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which side of the matched pair won once the event is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The bookmaker back bet won.
    BackWon,
    /// The exchange lay bet won (back bet lost).
    LayWon,
}

impl Outcome {
    pub const fn from_back_won(back_won: bool) -> Self {
        if back_won { Self::BackWon } else { Self::LayWon }
    }
}

/// Lifecycle status of a bet.
///
/// `Completed` carries the settlement data, so a pending bet can never
/// have an actual result and a completed one always has both fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BetStatus {
    /// Opened, event not yet decided.
    Pending,
    /// Settled; transition from `Pending` is one-way.
    Completed {
        /// Winning side.
        outcome: Outcome,
        /// Realized profit or loss.
        actual_result: Decimal,
        /// When the bet was settled.
        settled_at: DateTime<Utc>,
    },
}

/// Inputs supplied when opening a bet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetInputs {
    /// Event the bet is placed on (e.g. "Arsenal vs Chelsea").
    pub event_name: String,
    /// Wagering regime.
    pub bet_type: BetType,
    /// Bookmaker holding the back bet.
    #[serde(default = "default_bookmaker")]
    pub bookmaker: String,
    /// Exchange holding the lay bet.
    #[serde(default = "default_exchange")]
    pub exchange: String,
    /// Back stake (cash or free-bet amount).
    pub back_stake: Decimal,
    /// Decimal back odds at the bookmaker.
    pub back_odds: Decimal,
    /// Decimal lay odds at the exchange.
    pub lay_odds: Decimal,
    /// Exchange commission in percent (e.g. 2 for 2%).
    pub commission: Decimal,
    /// Scheduled start of the event, if known.
    #[serde(default)]
    pub event_time: Option<DateTime<Utc>>,
    /// Minutes before the event to remind; `None` uses the configured default.
    #[serde(default)]
    pub reminder_minutes: Option<u32>,
}

impl BetInputs {
    /// The subset of inputs the staking calculator consumes.
    pub fn staking_input(&self) -> StakingInput {
        StakingInput {
            bet_type: self.bet_type,
            back_stake: self.back_stake,
            back_odds: self.back_odds,
            lay_odds: self.lay_odds,
            commission: self.commission,
        }
    }
}

fn default_bookmaker() -> String {
    "Bonus Bookmaker".to_string()
}

fn default_exchange() -> String {
    "Betfair".to_string()
}

/// One row in the bet ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRecord {
    pub id: BetId,
    pub created_at: DateTime<Utc>,
    pub event_name: String,
    pub bet_type: BetType,
    pub bookmaker: String,
    pub exchange: String,
    pub back_stake: Decimal,
    pub back_odds: Decimal,
    pub lay_odds: Decimal,
    pub commission: Decimal,
    pub event_time: Option<DateTime<Utc>>,
    /// Lay stake computed at creation.
    pub lay_stake: Decimal,
    /// Exchange liability computed at creation.
    pub liability: Decimal,
    /// Profit if the back bet wins.
    pub expected_back_profit: Decimal,
    /// Profit if the lay bet wins.
    pub expected_lay_profit: Decimal,
    /// Average of the two expected profits.
    pub expected_result: Decimal,
    pub status: BetStatus,
}

impl BetRecord {
    /// Freeze inputs and calculator output into a new pending record.
    pub fn new(inputs: BetInputs, staking: &StakingResult, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            event_name: inputs.event_name,
            bet_type: inputs.bet_type,
            bookmaker: inputs.bookmaker,
            exchange: inputs.exchange,
            back_stake: inputs.back_stake,
            back_odds: inputs.back_odds,
            lay_odds: inputs.lay_odds,
            commission: inputs.commission,
            event_time: inputs.event_time,
            lay_stake: staking.lay_stake,
            liability: staking.liability,
            expected_back_profit: staking.back_profit,
            expected_lay_profit: staking.lay_profit,
            expected_result: staking.net_result,
            status: BetStatus::Pending,
        }
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self.status, BetStatus::Pending)
    }

    /// Realized result, `None` while pending.
    pub const fn actual_result(&self) -> Option<Decimal> {
        match self.status {
            BetStatus::Pending => None,
            BetStatus::Completed { actual_result, .. } => Some(actual_result),
        }
    }

    /// Winning side, `None` while pending.
    pub const fn outcome(&self) -> Option<Outcome> {
        match self.status {
            BetStatus::Pending => None,
            BetStatus::Completed { outcome, .. } => Some(outcome),
        }
    }

    /// Expected profit for the given winning side.
    pub const fn expected_profit(&self, outcome: Outcome) -> Decimal {
        match outcome {
            Outcome::BackWon => self.expected_back_profit,
            Outcome::LayWon => self.expected_lay_profit,
        }
    }

    /// Amount credited to the balance when settled with `actual_result`.
    ///
    /// Qualifying bets get their reserved stake back on top of the result.
    pub fn settlement_credit(&self, actual_result: Decimal) -> Decimal {
        if self.bet_type.uses_cash_stake() {
            self.back_stake + actual_result
        } else {
            actual_result
        }
    }
}
