use serde::{Deserialize, Serialize};

/// Winnings multiplier as a ratio of the stake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    pub const ONE_TO_ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, &'static str> {
        if denominator == 0 {
            return Err("Denominator cannot be zero");
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Saturates at `u64::MAX` instead of overflowing.
    pub fn calculate_payout(&self, bet: u64) -> u64 {
        let payout = (bet as u128 * self.numerator as u128) / self.denominator as u128;
        u64::try_from(payout).unwrap_or(u64::MAX)
    }
}

/// Table configuration for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    /// Balance at session start and after every reset
    pub initial_balance: i64,

    /// Dealer stops drawing at this total. Soft totals are not special-cased.
    pub dealer_stands_on: u8,

    /// Winnings paid on top of the returned stake when the player wins
    pub win_payout: PayoutRatio,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            initial_balance: 1000,
            dealer_stands_on: 17,
            win_payout: PayoutRatio::ONE_TO_ONE,
        }
    }
}

impl TableRules {
    pub fn with_initial_balance(mut self, initial_balance: i64) -> Self {
        self.initial_balance = initial_balance;
        self
    }
}
