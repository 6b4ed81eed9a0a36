//! Bet ledger bookkeeping.
//!
//! Owns the cash balance, the bets in insertion order, and the reminders
//! derived from them. Open, settle and delete are the only writers, and
//! each either applies completely or returns an error with nothing changed.
//!
//! Balance rules:
//! - open qualifying: debit back stake
//! - settle: credit `back_stake + result` (qualifying) or `result` (free)
//! - delete pending qualifying: refund back stake
//! - free bets and completed bets never move the balance otherwise

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bet::{BetId, BetInputs, BetRecord, BetStatus, Outcome};
use super::error::LedgerError;
use super::reminder::{plan_reminder, ReminderRecord};
use super::staking;

/// A freshly opened bet and the reminder planned for it.
#[derive(Debug, Clone)]
pub struct OpenedBet {
    pub bet: BetRecord,
    pub reminder: Option<ReminderRecord>,
    /// Balance right after the open.
    pub balance_after: Decimal,
}

/// A removed bet and the side effects of removing it.
#[derive(Debug, Clone)]
pub struct DeletedBet {
    pub bet: BetRecord,
    /// Stake returned to the balance (zero unless pending qualifying).
    pub refund: Decimal,
    /// Reminders dropped along with the bet.
    pub reminders_removed: usize,
    /// Balance right after the delete.
    pub balance_after: Decimal,
}

/// Dashboard totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub balance: Decimal,
    /// Sum of realized results over completed bets.
    pub total_profit: Decimal,
    pub pending_bets: usize,
    pub completed_bets: usize,
    /// Unsent reminders whose fire time is still ahead.
    pub upcoming_reminders: usize,
}

/// In-memory bet ledger and cash balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    balance: Decimal,
    bets: Vec<BetRecord>,
    reminders: Vec<ReminderRecord>,
}

impl Ledger {
    /// Empty ledger holding `balance` in cash.
    pub const fn new(balance: Decimal) -> Self {
        Self {
            balance,
            bets: Vec::new(),
            reminders: Vec::new(),
        }
    }

    /// Rebuild a ledger from persisted parts.
    pub fn restore(
        balance: Decimal,
        bets: Vec<BetRecord>,
        reminders: Vec<ReminderRecord>,
    ) -> Self {
        Self {
            balance,
            bets,
            reminders,
        }
    }

    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    /// Bets in the order they were opened.
    pub fn bets(&self) -> &[BetRecord] {
        &self.bets
    }

    pub fn reminders(&self) -> &[ReminderRecord] {
        &self.reminders
    }

    pub fn get(&self, id: BetId) -> Option<&BetRecord> {
        self.bets.iter().find(|b| b.id == id)
    }

    /// Open a bet: compute stakes, append a pending record, reserve the
    /// cash stake for qualifying bets, and plan a reminder.
    ///
    /// # Errors
    /// - `EmptyEventName` for a blank event name
    /// - `InvalidInput` when the calculator rejects the inputs
    /// - `InsufficientBalance` when a qualifying stake exceeds the balance
    pub fn open(
        &mut self,
        inputs: BetInputs,
        now: DateTime<Utc>,
    ) -> Result<OpenedBet, LedgerError> {
        if inputs.event_name.trim().is_empty() {
            return Err(LedgerError::EmptyEventName);
        }

        let staking = staking::compute(&inputs.staking_input())?;

        if inputs.bet_type.uses_cash_stake() && self.balance < inputs.back_stake {
            return Err(LedgerError::InsufficientBalance {
                required: inputs.back_stake,
                available: self.balance,
            });
        }

        let reminder = plan_reminder(
            &inputs.event_name,
            inputs.event_time,
            inputs.reminder_minutes.unwrap_or(0),
            now,
        );

        let bet = BetRecord::new(inputs, &staking, now);
        if bet.bet_type.uses_cash_stake() {
            self.balance -= bet.back_stake;
        }
        self.bets.push(bet.clone());
        if let Some(ref r) = reminder {
            self.reminders.push(r.clone());
        }

        Ok(OpenedBet {
            bet,
            reminder,
            balance_after: self.balance,
        })
    }

    /// Settle a pending bet with the winning side and credit the balance.
    ///
    /// # Errors
    /// - `NotFound` when no bet has this id
    /// - `AlreadySettled` when the bet is completed; the balance is untouched
    pub fn settle(
        &mut self,
        id: BetId,
        back_won: bool,
        now: DateTime<Utc>,
    ) -> Result<BetRecord, LedgerError> {
        let bet = self
            .bets
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(LedgerError::NotFound(id))?;

        if !bet.is_pending() {
            return Err(LedgerError::AlreadySettled(id));
        }

        let outcome = Outcome::from_back_won(back_won);
        let actual_result = bet.expected_profit(outcome);
        self.balance += bet.settlement_credit(actual_result);
        bet.status = BetStatus::Completed {
            outcome,
            actual_result,
            settled_at: now,
        };

        Ok(bet.clone())
    }

    /// Remove a bet, refunding a pending qualifying stake, and drop the
    /// reminders for its event.
    ///
    /// # Errors
    /// `NotFound` when no bet has this id.
    pub fn delete(&mut self, id: BetId) -> Result<DeletedBet, LedgerError> {
        let idx = self
            .bets
            .iter()
            .position(|b| b.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        let bet = self.bets.remove(idx);

        let refund = if bet.is_pending() && bet.bet_type.uses_cash_stake() {
            bet.back_stake
        } else {
            Decimal::ZERO
        };
        self.balance += refund;

        let before = self.reminders.len();
        self.reminders.retain(|r| r.event_name != bet.event_name);
        let reminders_removed = before - self.reminders.len();

        Ok(DeletedBet {
            bet,
            refund,
            reminders_removed,
            balance_after: self.balance,
        })
    }

    /// Mark every due reminder as sent and return them for delivery.
    pub fn take_due_reminders(&mut self, now: DateTime<Utc>) -> Vec<ReminderRecord> {
        self.reminders
            .iter_mut()
            .filter(|r| r.is_due(now))
            .map(|r| {
                r.sent = true;
                r.clone()
            })
            .collect()
    }

    pub fn summary(&self, now: DateTime<Utc>) -> LedgerSummary {
        let total_profit: Decimal = self
            .bets
            .iter()
            .filter_map(BetRecord::actual_result)
            .sum();
        let pending_bets = self.bets.iter().filter(|b| b.is_pending()).count();

        LedgerSummary {
            balance: self.balance,
            total_profit,
            pending_bets,
            completed_bets: self.bets.len() - pending_bets,
            upcoming_reminders: self
                .reminders
                .iter()
                .filter(|r| r.is_upcoming(now))
                .count(),
        }
    }
}
