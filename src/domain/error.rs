//! Ledger error taxonomy.
//!
//! Every rejection the calculator or bookkeeper can produce. Collaborator
//! failures (disk, notifications, network) are not represented here: they
//! are `anyhow` errors at the adapter layer and never undo ledger state.

use rust_decimal::Decimal;
use thiserror::Error;

use super::bet::BetId;

/// Errors raised by the staking calculator and the ledger bookkeeper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Odds, stake or commission outside the calculator's domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A bet cannot be opened without an event name.
    #[error("event name must not be empty")]
    EmptyEventName,

    /// A qualifying bet needs its back stake available in the balance.
    #[error("insufficient balance: {required} required, {available} available")]
    InsufficientBalance {
        /// Back stake the bet would reserve.
        required: Decimal,
        /// Balance at the time of the attempt.
        available: Decimal,
    },

    /// No bet with this id exists in the ledger.
    #[error("bet {0} not found")]
    NotFound(BetId),

    /// The bet has already been settled; settling again would double-credit.
    #[error("bet {0} is already settled")]
    AlreadySettled(BetId),
}
