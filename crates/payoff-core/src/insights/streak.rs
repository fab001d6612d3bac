use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PayoffError;
use crate::payoff::debt::Debt;
use crate::payoff::simulator::PlanResult;
use crate::types::{Money, Rate};
use crate::PayoffResult;

/// Share of starting principal a month's extra must reach to count.
pub const DEFAULT_STREAK_FLOOR_RATIO: Rate = dec!(0.001);

/// Extra-payment streak statistics over a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Minimum extra a month needs to qualify.
    pub floor: Money,
    pub qualifying_months: u32,
    /// Consecutive qualifying months counted from the first month.
    pub opening_streak: u32,
    pub longest_streak: u32,
    /// Extra paid in each month, in plan order.
    pub monthly_extra: Vec<Money>,
}

/// Amount paid above the minimums in each month, per-debt shortfalls ignored.
///
/// Every row must carry one payment per debt.
pub fn monthly_extra(plan: &PlanResult, debts: &[Debt]) -> PayoffResult<Vec<Money>> {
    plan.plan
        .iter()
        .map(|row| {
            if row.payments.len() != debts.len() {
                return Err(PayoffError::InvalidInput {
                    field: "debts".into(),
                    reason: format!(
                        "month {} has {} payments but {} debts were given",
                        row.month_index,
                        row.payments.len(),
                        debts.len()
                    ),
                });
            }
            row.payments
                .iter()
                .zip(debts)
                .map(|(paid, debt)| (*paid - debt.minimum).max(Decimal::ZERO))
                .try_fold(Decimal::ZERO, |acc, extra| acc.checked_add(extra))
                .ok_or_else(|| PayoffError::overflow("monthly extra payment"))
        })
        .collect()
}

/// Count the months whose extra reaches `total_principal * floor_ratio`.
///
/// `debts` must be the normalized list the plan was run on.
pub fn extra_payment_streak(
    plan: &PlanResult,
    debts: &[Debt],
    floor_ratio: Rate,
) -> PayoffResult<StreakSummary> {
    if floor_ratio < Decimal::ZERO {
        return Err(PayoffError::InvalidInput {
            field: "streak_floor_ratio".into(),
            reason: "must not be negative".into(),
        });
    }
    let floor = plan
        .total_principal
        .checked_mul(floor_ratio)
        .ok_or_else(|| PayoffError::overflow("streak floor"))?;
    let extras = monthly_extra(plan, debts)?;

    let mut qualifying_months = 0;
    let mut longest_streak = 0;
    let mut run = 0;
    let mut opening_streak: Option<u32> = None;

    for extra in &extras {
        if *extra >= floor && !extra.is_zero() {
            qualifying_months += 1;
            run += 1;
            longest_streak = longest_streak.max(run);
        } else {
            opening_streak.get_or_insert(run);
            run = 0;
        }
    }

    Ok(StreakSummary {
        floor,
        qualifying_months,
        opening_streak: opening_streak.unwrap_or(run),
        longest_streak,
        monthly_extra: extras,
    })
}
