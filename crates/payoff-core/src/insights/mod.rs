pub mod milestones;
pub mod streak;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::payoff::simulator::{prepare_plan, PlanInput, PlanResult};
use crate::types::{with_metadata, ComputationOutput, Rate};
use crate::PayoffResult;

pub use milestones::{closing_dates, principal_milestones, ClosingDate, Milestone};
pub use streak::{extra_payment_streak, StreakSummary, DEFAULT_STREAK_FLOOR_RATIO};

fn default_floor_ratio() -> Rate {
    DEFAULT_STREAK_FLOOR_RATIO
}

/// A plan input plus the knobs the reductions need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsInput {
    #[serde(flatten)]
    pub plan: PlanInput,
    #[serde(default = "default_floor_ratio")]
    pub streak_floor_ratio: Rate,
}

impl From<PlanInput> for InsightsInput {
    fn from(plan: PlanInput) -> Self {
        InsightsInput {
            plan,
            streak_floor_ratio: DEFAULT_STREAK_FLOOR_RATIO,
        }
    }
}

/// Post-hoc reductions over one plan for tables and badges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanInsights {
    pub months: u32,
    pub debt_free: bool,
    pub closing_dates: Vec<ClosingDate>,
    pub streak: StreakSummary,
    pub milestones: Vec<Milestone>,
}

impl PlanInsights {
    fn from_plan(result: &PlanResult, streak: StreakSummary, epsilon: Decimal) -> Self {
        PlanInsights {
            months: result.months,
            debt_free: result.is_debt_free(epsilon),
            closing_dates: closing_dates(result, epsilon),
            streak,
            milestones: principal_milestones(result, epsilon),
        }
    }
}

/// Run the plan and derive closing dates, the extra-payment streak and
/// principal milestones from it.
pub fn plan_insights(input: &InsightsInput) -> PayoffResult<ComputationOutput<PlanInsights>> {
    let start = Instant::now();

    let prepared = prepare_plan(&input.plan)?;
    let result = prepared.simulate()?;

    let mut warnings = prepared.warnings.clone();
    warnings.extend(prepared.outcome_warnings(&result));

    let streak = extra_payment_streak(&result, &prepared.debts, input.streak_floor_ratio)?;
    let insights = PlanInsights::from_plan(&result, streak, prepared.config.epsilon);

    let mut assumptions = prepared.assumptions();
    assumptions["streak_floor_ratio"] = serde_json::json!(input.streak_floor_ratio.to_string());

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Plan Insights (closing dates, extra-payment streak, milestones)",
        &assumptions,
        warnings,
        elapsed,
        insights,
    ))
}
