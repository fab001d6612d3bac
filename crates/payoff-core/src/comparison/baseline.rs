use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::payoff::simulator::{prepare_plan, PlanInput, PlanResult};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::PayoffResult;

/// The active plan next to a minimums-only run of the same debts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanComparison {
    pub plan: PlanResult,
    pub baseline: PlanResult,
    /// Baseline interest minus plan interest.
    pub interest_saved: Money,
    /// Baseline months minus plan months. Negative only if the extra budget
    /// somehow lengthens the plan.
    pub months_saved: i64,
}

/// Run the plan and a zero-extra baseline with the same engine.
pub fn compare_plans(input: &PlanInput) -> PayoffResult<ComputationOutput<PlanComparison>> {
    let start = Instant::now();

    let prepared = prepare_plan(input)?;
    let plan = prepared.simulate()?;
    let baseline = prepared.simulate_with(Decimal::ZERO, prepared.strategy)?;

    let mut warnings = prepared.warnings.clone();
    warnings.extend(prepared.outcome_warnings(&plan));
    if !baseline.is_debt_free(prepared.config.epsilon) && plan.is_debt_free(prepared.config.epsilon) {
        warnings.push(
            "Baseline never reaches zero within the horizon; interest saved is a lower bound".into(),
        );
    }

    let comparison = PlanComparison {
        interest_saved: baseline.total_interest - plan.total_interest,
        months_saved: i64::from(baseline.months) - i64::from(plan.months),
        plan,
        baseline,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Plan vs Minimum-Payments Baseline",
        &prepared.assumptions(),
        warnings,
        elapsed,
        comparison,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::debt::Debt;
    use crate::types::Strategy;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn input(extra: Decimal) -> PlanInput {
        PlanInput::new(
            vec![
                Debt::new("card", "Card", dec!(3000), dec!(21.9), dec!(90)),
                Debt::new("loan", "Loan", dec!(6000), dec!(7.5), dec!(150)),
            ],
            extra,
            Strategy::Avalanche,
        )
        .with_start_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn test_extra_saves_interest_and_time() {
        let out = compare_plans(&input(dec!(250))).unwrap().result;
        assert!(out.interest_saved > Decimal::ZERO);
        assert!(out.months_saved > 0);
        assert_eq!(
            out.interest_saved,
            out.baseline.total_interest - out.plan.total_interest
        );
    }

    #[test]
    fn test_zero_extra_saves_nothing() {
        let out = compare_plans(&input(Decimal::ZERO)).unwrap().result;
        assert_eq!(out.interest_saved, Decimal::ZERO);
        assert_eq!(out.months_saved, 0);
        assert_eq!(out.plan, out.baseline);
    }
}
