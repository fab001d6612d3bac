use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayoffError;
use crate::payoff::accrual::MonthAccrual;
use crate::payoff::debt::WorkingBalance;
use crate::types::Money;
use crate::PayoffResult;

/// One simulated month, per debt and in aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    pub month_index: u32,
    pub date: NaiveDate,
    /// Minimum plus extra paid to each debt, in input order.
    pub payments: Vec<Money>,
    /// Balance left on each debt after the month, never negative.
    pub remaining: Vec<Money>,
    pub interest: Money,
    pub total_remaining: Money,
}

/// Lightweight trend entry for charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub month_index: u32,
    pub total_remaining: Money,
    pub interest: Money,
}

/// Calendar date for a month index: `month_index + 1` months after the start.
///
/// Day-of-month is clamped to the end of shorter months.
pub fn month_date(start: NaiveDate, month_index: u32) -> PayoffResult<NaiveDate> {
    start
        .checked_add_months(Months::new(month_index + 1))
        .ok_or_else(|| {
            PayoffError::DateError(format!(
                "{start} plus {} months is out of range",
                month_index + 1
            ))
        })
}

/// Append-only accumulator for the month rows of one run.
#[derive(Debug, Default)]
pub struct TimelineRecorder {
    rows: Vec<MonthRow>,
    points: Vec<TimelinePoint>,
    total_interest: Money,
}

impl TimelineRecorder {
    pub fn with_capacity(months: usize) -> Self {
        TimelineRecorder {
            rows: Vec::with_capacity(months),
            points: Vec::with_capacity(months),
            total_interest: Decimal::ZERO,
        }
    }

    /// Record the month just simulated; returns the total remaining balance.
    pub fn record(
        &mut self,
        month_index: u32,
        date: NaiveDate,
        accrual: MonthAccrual,
        balances: &[WorkingBalance],
    ) -> PayoffResult<Money> {
        let remaining: Vec<Money> = balances
            .iter()
            .map(|wb| wb.balance.max(Decimal::ZERO))
            .collect();
        let total_remaining = remaining
            .iter()
            .try_fold(Decimal::ZERO, |acc, b| acc.checked_add(*b))
            .ok_or_else(|| PayoffError::overflow("total remaining balance"))?;

        self.total_interest = self
            .total_interest
            .checked_add(accrual.interest)
            .ok_or_else(|| PayoffError::overflow("running interest total"))?;
        self.points.push(TimelinePoint {
            month_index,
            total_remaining,
            interest: accrual.interest,
        });
        self.rows.push(MonthRow {
            month_index,
            date,
            payments: accrual.payments,
            remaining,
            interest: accrual.interest,
            total_remaining,
        });

        Ok(total_remaining)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_interest(&self) -> Money {
        self.total_interest
    }

    pub fn last_row(&self) -> Option<&MonthRow> {
        self.rows.last()
    }

    /// Consume the recorder: (trend points, month rows, total interest).
    pub fn finish(self) -> (Vec<TimelinePoint>, Vec<MonthRow>, Money) {
        (self.points, self.rows, self.total_interest)
    }
}
