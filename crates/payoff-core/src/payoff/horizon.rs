use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::payoff::debt::WorkingBalance;
use crate::types::Money;

/// Default month cap: 50 years.
pub const DEFAULT_HORIZON_MONTHS: u32 = 600;

/// Upper bound accepted for a configured cap.
pub const MAX_HORIZON_MONTHS: u32 = 1200;

/// Balances at or below this are treated as closed.
pub const DEFAULT_EPSILON: Decimal = dec!(0.0001);

/// Decides whether the month loop runs another cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizon {
    cap: u32,
    epsilon: Decimal,
}

impl Horizon {
    pub fn new(cap: u32, epsilon: Decimal) -> Self {
        Horizon { cap, epsilon }
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Another month runs while under the cap and some balance is still open.
    pub fn should_continue(&self, month_index: u32, balances: &[WorkingBalance]) -> bool {
        month_index < self.cap && balances.iter().any(|wb| wb.balance > self.epsilon)
    }

    /// True once the combined balance is effectively zero.
    pub fn is_settled(&self, total_remaining: Money) -> bool {
        total_remaining <= self.epsilon
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Horizon::new(DEFAULT_HORIZON_MONTHS, DEFAULT_EPSILON)
    }
}
