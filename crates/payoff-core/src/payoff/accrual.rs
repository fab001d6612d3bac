use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::PayoffError;
use crate::payoff::debt::WorkingBalance;
use crate::payoff::simulator::PerDebtOutcome;
use crate::payoff::strategy::select_target;
use crate::payoff::timeline::month_date;
use crate::types::{Money, Strategy};
use crate::PayoffResult;

/// What one simulated month did.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthAccrual {
    /// Interest accrued across all debts this month.
    pub interest: Money,
    /// Minimum plus extra paid to each debt, in input order.
    pub payments: Vec<Money>,
    /// Portion of the extra budget that found an open debt.
    pub extra_applied: Money,
}

/// Advance every working balance by exactly one month, in place.
///
/// Order within the month: interest accrues on each open debt, then its
/// minimum payment (clamped to the balance) comes off, then the extra budget
/// is handed out one target at a time. A target that closes mid-distribution
/// sends the leftover straight on to the next target in the same month.
pub fn accrue_month(
    balances: &mut [WorkingBalance],
    extra: Money,
    strategy: Strategy,
    epsilon: Decimal,
) -> PayoffResult<MonthAccrual> {
    let mut interest_total = Decimal::ZERO;
    let mut payments = vec![Decimal::ZERO; balances.len()];

    for (wb, paid) in balances.iter_mut().zip(payments.iter_mut()) {
        if !wb.is_open() {
            continue;
        }

        let interest = wb
            .balance
            .checked_mul(wb.monthly_rate)
            .ok_or_else(|| PayoffError::overflow("interest accrual"))?;
        wb.balance = wb
            .balance
            .checked_add(interest)
            .ok_or_else(|| PayoffError::overflow("balance after interest"))?;
        wb.interest_accrued = wb
            .interest_accrued
            .checked_add(interest)
            .ok_or_else(|| PayoffError::overflow("per-debt interest total"))?;
        interest_total = interest_total
            .checked_add(interest)
            .ok_or_else(|| PayoffError::overflow("monthly interest total"))?;

        let minimum = wb.minimum.min(wb.balance);
        wb.balance -= minimum;
        *paid = minimum;
    }

    // Cascade: each pass either closes the target or exhausts the budget.
    let mut remaining = extra;
    while remaining > epsilon {
        let Some(target) = select_target(balances, strategy) else {
            break;
        };
        let wb = &mut balances[target];
        let applied = remaining.min(wb.balance);
        wb.balance -= applied;
        payments[target] += applied;
        remaining -= applied;
    }

    Ok(MonthAccrual {
        interest: interest_total,
        payments,
        extra_applied: extra - remaining,
    })
}

/// Stamp the payoff month on every debt that closed and has none recorded yet.
pub fn record_payoffs(
    balances: &[WorkingBalance],
    outcomes: &mut [PerDebtOutcome],
    month_index: u32,
    start_date: NaiveDate,
    epsilon: Decimal,
) -> PayoffResult<()> {
    for (wb, outcome) in balances.iter().zip(outcomes.iter_mut()) {
        if wb.balance <= epsilon && outcome.payoff_month_index.is_none() {
            outcome.payoff_month_index = Some(month_index);
            outcome.payoff_date = Some(month_date(start_date, month_index)?);
        }
    }
    Ok(())
}
