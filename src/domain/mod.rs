//! Domain layer - Staking math and bet bookkeeping.
//!
//! Pure logic for the matched betting tracker: the staking calculator,
//! the bet ledger with its balance rules, and reminder planning.
//! No I/O here (hexagonal architecture inner ring); everything is
//! serializable and testable in isolation.

pub mod bet;
pub mod error;
pub mod ledger;
pub mod reminder;
pub mod staking;

// Re-export core types for convenience
pub use bet::{BetId, BetInputs, BetRecord, BetStatus, BetType, Outcome};
pub use error::LedgerError;
pub use ledger::{DeletedBet, Ledger, LedgerSummary, OpenedBet};
pub use reminder::ReminderRecord;
pub use staking::{StakingInput, StakingResult};
