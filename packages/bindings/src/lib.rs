use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_plan(input_json: String) -> NapiResult<String> {
    let input: payoff_core::payoff::PlanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payoff_core::payoff::simulate_plan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_plans(input_json: String) -> NapiResult<String> {
    let input: payoff_core::payoff::PlanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        payoff_core::comparison::baseline::compare_plans(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_strategies(input_json: String) -> NapiResult<String> {
    let input: payoff_core::payoff::PlanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payoff_core::comparison::strategies::compare_strategies(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

#[napi]
pub fn plan_insights(input_json: String) -> NapiResult<String> {
    let input: payoff_core::insights::InsightsInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payoff_core::insights::plan_insights(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct StreakBindingInput {
    plan: payoff_core::payoff::PlanResult,
    debts: Vec<payoff_core::payoff::Debt>,
    #[serde(default)]
    floor_ratio: Option<rust_decimal::Decimal>,
}

/// Re-derive the extra-payment streak from a plan the caller already holds.
///
/// `debts` must line up with the plan's per-debt payment vectors.
#[napi]
pub fn extra_payment_streak(input_json: String) -> NapiResult<String> {
    let input: StreakBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    if input.debts.len() != input.plan.payoff.len() {
        return Err(napi::Error::from_reason(format!(
            "debts has {} entries but the plan covers {} debts",
            input.debts.len(),
            input.plan.payoff.len()
        )));
    }
    let ratio = input
        .floor_ratio
        .unwrap_or(payoff_core::insights::DEFAULT_STREAK_FLOOR_RATIO);
    let output = payoff_core::insights::extra_payment_streak(&input.plan, &input.debts, ratio)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
