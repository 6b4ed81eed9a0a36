//! Matched betting staking calculator.
//!
//! Converts a bookmaker back bet (stake, odds) and an exchange lay price
//! (odds, commission) into the lay stake that hedges it, the exchange
//! liability, and the profit under each outcome.
//!
//! Three regimes, each with its own formula:
//! - Qualifying: cash stake at risk on the back side
//! - Free bet, stake not returned (SNR): only the winnings are paid out
//! - Free bet, stake returned (SR): stake is paid out with the winnings
//!
//! With `c = commission / 100` the exchange keeps `c` of lay winnings, so
//! every regime divides by the effective lay price `lay - (lay - 1) * c`.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::bet::BetType;
use super::error::LedgerError;

/// Highest decimal odds accepted (exchange ladder ceiling).
pub const MAX_ODDS: Decimal = dec!(1000);

/// Largest stake accepted.
pub const MAX_STAKE: Decimal = dec!(1000000000);

/// Net result below this magnitude marks a qualifying bet as good.
const QUALIFYING_LOSS_TOLERANCE: Decimal = Decimal::ONE;

/// Calculator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingInput {
    pub bet_type: BetType,
    /// Back stake (cash or free-bet amount).
    pub back_stake: Decimal,
    /// Decimal odds of the back bet.
    pub back_odds: Decimal,
    /// Decimal odds of the lay bet.
    pub lay_odds: Decimal,
    /// Exchange commission in percent.
    pub commission: Decimal,
}

impl StakingInput {
    /// Reject inputs outside the calculator's domain.
    ///
    /// Odds at or below 1 make the formulas degenerate, and commission of
    /// 100% or more leaves nothing to hedge with.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.back_odds <= Decimal::ONE || self.back_odds > MAX_ODDS {
            return Err(LedgerError::InvalidInput(format!(
                "back odds must be in (1, {MAX_ODDS}], got {}",
                self.back_odds
            )));
        }
        if self.lay_odds <= Decimal::ONE || self.lay_odds > MAX_ODDS {
            return Err(LedgerError::InvalidInput(format!(
                "lay odds must be in (1, {MAX_ODDS}], got {}",
                self.lay_odds
            )));
        }
        if self.back_stake < Decimal::ZERO {
            return Err(LedgerError::InvalidInput(format!(
                "back stake must not be negative, got {}",
                self.back_stake
            )));
        }
        if self.back_stake > MAX_STAKE {
            return Err(LedgerError::InvalidInput(format!(
                "back stake must not exceed {MAX_STAKE}, got {}",
                self.back_stake
            )));
        }
        if self.commission < Decimal::ZERO || self.commission >= Decimal::ONE_HUNDRED {
            return Err(LedgerError::InvalidInput(format!(
                "commission must be in [0, 100), got {}",
                self.commission
            )));
        }
        Ok(())
    }
}

/// Calculator output, every amount rounded to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingResult {
    /// Stake to lay at the exchange.
    pub lay_stake: Decimal,
    /// Amount the exchange holds against the lay bet.
    pub liability: Decimal,
    /// Overall profit if the back bet wins.
    pub back_profit: Decimal,
    /// Overall profit if the lay bet wins.
    pub lay_profit: Decimal,
    /// Average of the two outcomes.
    pub net_result: Decimal,
    /// Near-zero loss for qualifying bets, positive profit for free bets.
    pub is_good_bet: bool,
}

impl StakingResult {
    /// Short verdict shown next to a calculation.
    pub const fn verdict(&self, bet_type: BetType) -> &'static str {
        match (bet_type, self.is_good_bet) {
            (BetType::Qualifying, true) => "Low Loss",
            (BetType::Qualifying, false) => "High Loss",
            (_, true) => "Profitable",
            (_, false) => "Check Odds",
        }
    }
}

/// Unrounded amounts produced by one regime's formula.
#[derive(Debug, Clone, Copy)]
struct Hedge {
    lay_stake: Decimal,
    liability: Decimal,
    back_profit: Decimal,
    lay_profit: Decimal,
}

/// Compute the lay stake, liability and profits for a matched bet.
///
/// Pure and deterministic; rounding happens once, on the final outputs.
///
/// # Errors
/// Returns `LedgerError::InvalidInput` when odds, stake or commission are
/// outside the domain described on [`StakingInput::validate`].
pub fn compute(input: &StakingInput) -> Result<StakingResult, LedgerError> {
    input.validate()?;

    let c = input.commission / Decimal::ONE_HUNDRED;
    let effective_lay = input.lay_odds - (input.lay_odds - Decimal::ONE) * c;

    let hedge = match input.bet_type {
        BetType::Qualifying => qualifying(input, c, effective_lay),
        BetType::FreeSnr => free_stake_not_returned(input, c, effective_lay),
        BetType::FreeSr => free_stake_returned(input, c, effective_lay),
    };

    let net_result = round_cents((hedge.back_profit + hedge.lay_profit) / Decimal::TWO);
    let is_good_bet = match input.bet_type {
        BetType::Qualifying => net_result.abs() < QUALIFYING_LOSS_TOLERANCE,
        BetType::FreeSnr | BetType::FreeSr => net_result > Decimal::ZERO,
    };

    Ok(StakingResult {
        lay_stake: round_cents(hedge.lay_stake),
        liability: round_cents(hedge.liability),
        back_profit: round_cents(hedge.back_profit),
        lay_profit: round_cents(hedge.lay_profit),
        net_result,
        is_good_bet,
    })
}

/// Cash back stake: losing the back bet costs the stake.
fn qualifying(input: &StakingInput, c: Decimal, effective_lay: Decimal) -> Hedge {
    let lay_stake = input.back_odds * input.back_stake / effective_lay;
    let liability = lay_stake * (input.lay_odds - Decimal::ONE);
    Hedge {
        lay_stake,
        liability,
        back_profit: (input.back_odds - Decimal::ONE) * input.back_stake - liability,
        lay_profit: lay_stake * (Decimal::ONE - c) - input.back_stake,
    }
}

/// Free bet, stake not returned: only `odds - 1` of the stake is ever paid.
fn free_stake_not_returned(input: &StakingInput, c: Decimal, effective_lay: Decimal) -> Hedge {
    let lay_stake = (input.back_odds - Decimal::ONE) / effective_lay * input.back_stake;
    let liability = lay_stake * (input.lay_odds - Decimal::ONE);
    Hedge {
        lay_stake,
        liability,
        back_profit: (input.back_odds - Decimal::ONE) * input.back_stake - liability,
        lay_profit: lay_stake * (Decimal::ONE - c),
    }
}

/// Free bet, stake returned: the full `odds * stake` is paid on a win.
fn free_stake_returned(input: &StakingInput, c: Decimal, effective_lay: Decimal) -> Hedge {
    let lay_stake = input.back_odds * input.back_stake / effective_lay;
    let liability = lay_stake * (input.lay_odds - Decimal::ONE);
    Hedge {
        lay_stake,
        liability,
        back_profit: input.back_odds * input.back_stake - liability,
        lay_profit: lay_stake * (Decimal::ONE - c),
    }
}

/// Round half away from zero to two decimal places.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        bet_type: BetType,
        back_stake: Decimal,
        back_odds: Decimal,
        lay_odds: Decimal,
        commission: Decimal,
    ) -> StakingInput {
        StakingInput {
            bet_type,
            back_stake,
            back_odds,
            lay_odds,
            commission,
        }
    }

    #[test]
    fn test_qualifying_example() {
        let r = compute(&input(BetType::Qualifying, dec!(10), dec!(2.0), dec!(2.1), dec!(2)))
            .unwrap();
        assert_eq!(r.lay_stake, dec!(9.62));
        assert_eq!(r.liability, dec!(10.59));
        assert_eq!(r.back_profit, dec!(-0.59));
        assert_eq!(r.lay_profit, dec!(-0.57));
        assert_eq!(r.net_result, dec!(-0.58));
        assert!(r.is_good_bet);
        assert_eq!(r.verdict(BetType::Qualifying), "Low Loss");
    }

    #[test]
    fn test_free_snr_example() {
        let r = compute(&input(BetType::FreeSnr, dec!(20), dec!(3.0), dec!(3.2), dec!(5)))
            .unwrap();
        assert_eq!(r.lay_stake, dec!(12.94));
        assert_eq!(r.liability, dec!(28.48));
        assert_eq!(r.back_profit, dec!(11.52));
        assert_eq!(r.lay_profit, dec!(12.30));
        assert_eq!(r.net_result, dec!(11.91));
        assert!(r.is_good_bet);
        assert_eq!(r.verdict(BetType::FreeSnr), "Profitable");
    }

    #[test]
    fn test_free_sr_example() {
        let r = compute(&input(BetType::FreeSr, dec!(10), dec!(5.0), dec!(5.5), dec!(2)))
            .unwrap();
        assert_eq!(r.lay_stake, dec!(9.24));
        assert_eq!(r.liability, dec!(41.59));
        assert_eq!(r.back_profit, dec!(8.41));
        assert_eq!(r.lay_profit, dec!(9.06));
        assert_eq!(r.net_result, dec!(8.73));
        assert!(r.is_good_bet);
    }

    #[test]
    fn test_qualifying_large_loss_is_not_good() {
        // Wide back/lay gap: 50 @ 1.5 laid at 3.0
        let r = compute(&input(BetType::Qualifying, dec!(50), dec!(1.5), dec!(3.0), dec!(5)))
            .unwrap();
        assert!(r.net_result.abs() >= Decimal::ONE);
        assert!(!r.is_good_bet);
        assert_eq!(r.verdict(BetType::Qualifying), "High Loss");
    }

    #[test]
    fn test_zero_stake_yields_zeroes() {
        let r = compute(&input(BetType::FreeSnr, Decimal::ZERO, dec!(4), dec!(4.2), dec!(2)))
            .unwrap();
        assert!(r.lay_stake.is_zero());
        assert!(r.net_result.is_zero());
        assert!(!r.is_good_bet);
        assert_eq!(r.verdict(BetType::FreeSnr), "Check Odds");
    }

    #[test]
    fn test_qualifying_equal_odds_no_commission_is_flat() {
        let r = compute(&input(BetType::Qualifying, dec!(25), dec!(3.0), dec!(3.0), dec!(0)))
            .unwrap();
        assert!(r.back_profit.is_zero());
        assert!(r.lay_profit.is_zero());
        assert!(r.net_result.is_zero());
    }

    #[test]
    fn test_rejects_odds_at_or_below_one() {
        let err = compute(&input(BetType::Qualifying, dec!(10), dec!(1.0), dec!(2.0), dec!(2)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        let err = compute(&input(BetType::FreeSr, dec!(10), dec!(2.0), dec!(0.5), dec!(2)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_bad_stake_and_commission() {
        assert!(compute(&input(BetType::Qualifying, dec!(-1), dec!(2), dec!(2.1), dec!(2))).is_err());
        assert!(compute(&input(BetType::Qualifying, dec!(10), dec!(2), dec!(2.1), dec!(100))).is_err());
        assert!(compute(&input(BetType::Qualifying, dec!(10), dec!(2), dec!(2.1), dec!(-0.5))).is_err());
        assert!(compute(&input(BetType::Qualifying, dec!(10), dec!(2), dec!(2.1), dec!(99.9))).is_ok());
    }

    #[test]
    fn test_round_cents_midpoint_away_from_zero() {
        assert_eq!(round_cents(dec!(1.005)), dec!(1.01));
        assert_eq!(round_cents(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_cents(dec!(2.004)), dec!(2.00));
    }
}
