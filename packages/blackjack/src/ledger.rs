use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{GameError, Outcome, PayoutRatio};

/// A validated stake: always a positive whole number of chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bet(u64);

impl Bet {
    pub fn new(amount: i64) -> Result<Self, GameError> {
        if amount <= 0 {
            return Err(GameError::InvalidBet(format!(
                "{amount} is not a positive amount"
            )));
        }
        Ok(Self(amount as u64))
    }

    pub fn amount(&self) -> u64 {
        self.0
    }
}

impl FromStr for Bet {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount: i64 = trimmed
            .parse()
            .map_err(|_| GameError::InvalidBet(format!("'{trimmed}' is not a whole number")))?;
        Self::new(amount)
    }
}

/// Balance and stake for one session. The balance has no floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: i64,
    current_bet: Option<Bet>,
    initial_balance: i64,
}

impl Ledger {
    pub fn new(initial_balance: i64) -> Self {
        Self {
            balance: initial_balance,
            current_bet: None,
            initial_balance,
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn current_bet(&self) -> Option<Bet> {
        self.current_bet
    }

    /// Deduct the stake up front. Funds on hand are not checked.
    pub fn place_bet(&mut self, bet: Bet) {
        self.balance = offset_balance(self.balance, -(bet.amount() as i128));
        self.current_bet = Some(bet);
    }

    /// Credit the stake back according to the outcome and return the amount credited.
    /// Losses credit nothing since the stake left the balance in `place_bet`.
    pub fn apply_outcome(&mut self, outcome: Outcome, bet: Bet, win_payout: PayoutRatio) -> u64 {
        let payout = match outcome {
            Outcome::PlayerWin => bet
                .amount()
                .saturating_add(win_payout.calculate_payout(bet.amount())),
            Outcome::Push => bet.amount(),
            Outcome::Bust | Outcome::DealerWin => 0,
        };
        self.balance = offset_balance(self.balance, payout as i128);
        payout
    }

    pub fn reset(&mut self) {
        self.balance = self.initial_balance;
        self.current_bet = None;
    }
}

/// Apply a signed change exactly, clamping only at the `i64` limits.
fn offset_balance(balance: i64, delta: i128) -> i64 {
    (balance as i128 + delta).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}
