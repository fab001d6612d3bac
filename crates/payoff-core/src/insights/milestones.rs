use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::payoff::simulator::PlanResult;
use crate::types::Rate;

/// Paid-down fractions of the starting principal that earn a milestone.
pub const MILESTONE_FRACTIONS: [Rate; 4] = [dec!(0.25), dec!(0.5), dec!(0.75), dec!(1)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub fraction: Rate,
    pub month_index: Option<u32>,
    pub date: Option<NaiveDate>,
}

/// Closing date of one debt, read back off the month rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosingDate {
    pub id: String,
    pub name: String,
    pub month_index: Option<u32>,
    pub date: Option<NaiveDate>,
}

/// First month in which the combined balance falls to
/// `total_principal * (1 - fraction)`. Full payoff uses `epsilon`.
pub fn principal_milestones(plan: &PlanResult, epsilon: Decimal) -> Vec<Milestone> {
    MILESTONE_FRACTIONS
        .iter()
        .map(|&fraction| {
            let threshold = if fraction >= Decimal::ONE {
                epsilon
            } else {
                plan.total_principal * (Decimal::ONE - fraction)
            };
            let hit = plan.plan.iter().find(|row| row.total_remaining <= threshold);
            Milestone {
                fraction,
                month_index: hit.map(|row| row.month_index),
                date: hit.map(|row| row.date),
            }
        })
        .collect()
}

/// Per debt, the first row where its remaining balance is at or below
/// `epsilon`. Balances never rise once paid down, so this is the closing row.
pub fn closing_dates(plan: &PlanResult, epsilon: Decimal) -> Vec<ClosingDate> {
    plan.payoff
        .iter()
        .enumerate()
        .map(|(idx, outcome)| {
            let hit = plan
                .plan
                .iter()
                .find(|row| row.remaining.get(idx).is_some_and(|r| *r <= epsilon));
            ClosingDate {
                id: outcome.id.clone(),
                name: outcome.name.clone(),
                month_index: hit.map(|row| row.month_index),
                date: hit.map(|row| row.date),
            }
        })
        .collect()
}
