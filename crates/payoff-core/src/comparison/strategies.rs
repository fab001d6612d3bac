use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::payoff::simulator::{prepare_plan, PlanInput, PlanResult};
use crate::types::{with_metadata, ComputationOutput, Money, Strategy};
use crate::PayoffResult;

/// Headline numbers of one strategy's run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: Strategy,
    pub months: u32,
    pub total_interest: Money,
    /// Debt ids in the order they close. Debts that never close are left out.
    pub payoff_order: Vec<String>,
}

impl StrategySummary {
    fn from_result(strategy: Strategy, result: &PlanResult) -> Self {
        let mut closed: Vec<(u32, usize)> = result
            .payoff
            .iter()
            .enumerate()
            .filter_map(|(idx, o)| o.payoff_month_index.map(|m| (m, idx)))
            .collect();
        closed.sort_unstable();

        StrategySummary {
            strategy,
            months: result.months,
            total_interest: result.total_interest,
            payoff_order: closed
                .into_iter()
                .map(|(_, idx)| result.payoff[idx].id.clone())
                .collect(),
        }
    }
}

/// Avalanche and snowball side by side for the same debts and budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: StrategySummary,
    pub snowball: StrategySummary,
    /// Snowball interest minus avalanche interest.
    pub interest_difference: Money,
    /// Cheaper strategy; avalanche on a tie.
    pub cheaper: Strategy,
}

/// Run the input under both strategies. The input's own strategy is ignored.
pub fn compare_strategies(input: &PlanInput) -> PayoffResult<ComputationOutput<StrategyComparison>> {
    let start = Instant::now();

    let prepared = prepare_plan(input)?;
    let avalanche = prepared.simulate_with(prepared.extra, Strategy::Avalanche)?;
    let snowball = prepared.simulate_with(prepared.extra, Strategy::Snowball)?;

    let mut warnings = prepared.warnings.clone();
    for (strategy, result) in [(Strategy::Avalanche, &avalanche), (Strategy::Snowball, &snowball)] {
        warnings.extend(
            prepared
                .outcome_warnings(result)
                .into_iter()
                .map(|w| format!("{strategy}: {w}")),
        );
    }

    let interest_difference = snowball.total_interest - avalanche.total_interest;
    let cheaper = if interest_difference < Decimal::ZERO {
        Strategy::Snowball
    } else {
        Strategy::Avalanche
    };

    let comparison = StrategyComparison {
        avalanche: StrategySummary::from_result(Strategy::Avalanche, &avalanche),
        snowball: StrategySummary::from_result(Strategy::Snowball, &snowball),
        interest_difference,
        cheaper,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Avalanche vs Snowball Strategy Comparison",
        &prepared.assumptions(),
        warnings,
        elapsed,
        comparison,
    ))
}
