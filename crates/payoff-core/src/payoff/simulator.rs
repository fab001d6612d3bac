use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, trace, warn};

use crate::error::PayoffError;
use crate::payoff::accrual::{accrue_month, record_payoffs};
use crate::payoff::debt::{coerce_number, normalize_debts, Debt, RawDebt, WorkingBalance};
use crate::payoff::horizon::{Horizon, DEFAULT_EPSILON, DEFAULT_HORIZON_MONTHS, MAX_HORIZON_MONTHS};
use crate::payoff::timeline::{month_date, MonthRow, TimelinePoint, TimelineRecorder};
use crate::types::{with_metadata, ComputationOutput, Money, Strategy};
use crate::PayoffResult;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Month cap; the loop never runs past it.
    pub horizon_months: u32,
    /// Balances at or below this count as paid off.
    pub epsilon: Decimal,
    /// Fill `PerDebtOutcome::interest_paid` with each debt's accrued interest.
    /// Off by default, which leaves it at zero.
    pub attribute_interest: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            horizon_months: DEFAULT_HORIZON_MONTHS,
            epsilon: DEFAULT_EPSILON,
            attribute_interest: false,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> PayoffResult<()> {
        if self.horizon_months == 0 || self.horizon_months > MAX_HORIZON_MONTHS {
            return Err(PayoffError::InvalidInput {
                field: "config.horizon_months".into(),
                reason: format!("must be between 1 and {MAX_HORIZON_MONTHS}"),
            });
        }
        if self.epsilon <= Decimal::ZERO || self.epsilon >= Decimal::ONE {
            return Err(PayoffError::InvalidInput {
                field: "config.epsilon".into(),
                reason: "must be greater than 0 and less than 1".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything one plan needs, as a caller submits it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanInput {
    #[serde(default)]
    pub debts: Vec<RawDebt>,
    /// Monthly budget on top of the minimums.
    #[serde(default)]
    pub extra: Value,
    #[serde(default)]
    pub strategy: Strategy,
    /// Defaults to today's local date.
    #[serde(default, alias = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub config: SimulationConfig,
}

impl PlanInput {
    pub fn new(debts: Vec<Debt>, extra: Money, strategy: Strategy) -> Self {
        PlanInput {
            debts: debts.into_iter().map(RawDebt::from).collect(),
            extra: Value::String(extra.to_string()),
            strategy,
            start_date: None,
            config: SimulationConfig::default(),
        }
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

/// Per-debt summary of one run, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerDebtOutcome {
    pub id: String,
    pub name: String,
    pub starting_balance: Money,
    /// 0-based month in which the balance first reached zero.
    pub payoff_month_index: Option<u32>,
    pub payoff_date: Option<NaiveDate>,
    /// Zero unless `SimulationConfig::attribute_interest` is set.
    pub interest_paid: Money,
}

impl PerDebtOutcome {
    pub fn open(debt: &Debt) -> Self {
        PerDebtOutcome {
            id: debt.id.clone(),
            name: debt.name.clone(),
            starting_balance: debt.balance,
            payoff_month_index: None,
            payoff_date: None,
            interest_paid: Decimal::ZERO,
        }
    }
}

/// Aggregate of one full simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Months simulated; equals the cap when the plan never reaches zero.
    pub months: u32,
    pub total_principal: Money,
    pub timeline: Vec<TimelinePoint>,
    pub total_interest: Money,
    pub payoff: Vec<PerDebtOutcome>,
    pub plan: Vec<MonthRow>,
}

impl PlanResult {
    pub fn empty() -> Self {
        PlanResult {
            months: 0,
            total_principal: Decimal::ZERO,
            timeline: Vec::new(),
            total_interest: Decimal::ZERO,
            payoff: Vec::new(),
            plan: Vec::new(),
        }
    }

    /// Combined balance after the last simulated month.
    pub fn final_balance(&self) -> Money {
        self.plan
            .last()
            .map(|row| row.total_remaining)
            .unwrap_or(self.total_principal)
    }

    pub fn is_debt_free(&self, epsilon: Decimal) -> bool {
        self.final_balance() <= epsilon
    }
}

/// A validated, normalized plan ready to run (possibly more than once).
#[derive(Debug, Clone)]
pub struct PreparedPlan {
    pub debts: Vec<Debt>,
    pub extra: Money,
    pub strategy: Strategy,
    pub start_date: NaiveDate,
    pub config: SimulationConfig,
    /// Input-side warnings: dropped rows, coerced extra, uncovered interest.
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Preparation
// ---------------------------------------------------------------------------

fn coerce_extra(value: &Value, warnings: &mut Vec<String>) -> Money {
    let extra = coerce_number(value);
    if extra < Decimal::ZERO {
        warnings.push(format!("Extra payment {extra} is negative; using 0"));
        return Decimal::ZERO;
    }
    let unparseable = match value {
        Value::String(s) => {
            let s = s.trim();
            !s.is_empty()
                && Decimal::from_str(s).is_err()
                && Decimal::from_scientific(s).is_err()
        }
        Value::Array(_) | Value::Object(_) => true,
        _ => false,
    };
    if unparseable {
        warnings.push(format!("Extra payment {value} is not numeric; using 0"));
    }
    extra
}

/// Validate config, normalize debts and coerce the extra budget.
pub fn prepare_plan(input: &PlanInput) -> PayoffResult<PreparedPlan> {
    input.config.validate()?;
    let mut warnings: Vec<String> = Vec::new();

    let normalized = normalize_debts(&input.debts);
    for dropped in &normalized.dropped {
        warnings.push(format!(
            "Debt #{} ('{}'{}) dropped: {}",
            dropped.position + 1,
            dropped.name,
            if dropped.id.is_empty() {
                String::new()
            } else {
                format!(", id {}", dropped.id)
            },
            dropped.reason
        ));
    }

    for debt in &normalized.debts {
        let interest = debt.first_month_interest()?;
        if debt.minimum < interest {
            warnings.push(format!(
                "Debt '{}': minimum payment {} does not cover first-month interest {}",
                debt.name,
                debt.minimum,
                interest.round_dp(2)
            ));
        }
    }

    let extra = coerce_extra(&input.extra, &mut warnings);

    Ok(PreparedPlan {
        debts: normalized.debts,
        extra,
        strategy: input.strategy,
        start_date: input
            .start_date
            .unwrap_or_else(|| Local::now().date_naive()),
        config: input.config.clone(),
        warnings,
    })
}

impl PreparedPlan {
    pub fn simulate(&self) -> PayoffResult<PlanResult> {
        self.simulate_with(self.extra, self.strategy)
    }

    pub fn simulate_with(&self, extra: Money, strategy: Strategy) -> PayoffResult<PlanResult> {
        simulate_debts(&self.debts, extra, strategy, self.start_date, &self.config)
    }

    /// Warnings that depend on how a run turned out.
    pub fn outcome_warnings(&self, result: &PlanResult) -> Vec<String> {
        let mut warnings = Vec::new();
        if result.months >= self.config.horizon_months && !result.is_debt_free(self.config.epsilon) {
            warnings.push(format!(
                "Horizon of {} months reached with {} still outstanding; the plan does not reach zero",
                self.config.horizon_months,
                result.final_balance().round_dp(2)
            ));
        }
        warnings
    }

    pub fn assumptions(&self) -> Value {
        serde_json::json!({
            "strategy": self.strategy,
            "extra": self.extra.to_string(),
            "start_date": self.start_date,
            "debts": self.debts.len(),
            "horizon_months": self.config.horizon_months,
            "epsilon": self.config.epsilon.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Run the month loop over already-normalized debts.
///
/// Pure: every call owns its working balances and returns the same result
/// for the same arguments. A negative `extra` is treated as zero.
pub fn simulate_debts(
    debts: &[Debt],
    extra: Money,
    strategy: Strategy,
    start_date: NaiveDate,
    config: &SimulationConfig,
) -> PayoffResult<PlanResult> {
    config.validate()?;
    if debts.is_empty() {
        return Ok(PlanResult::empty());
    }

    let extra = extra.max(Decimal::ZERO);
    let horizon = Horizon::new(config.horizon_months, config.epsilon);
    let total_principal = debts
        .iter()
        .try_fold(Decimal::ZERO, |acc, d| acc.checked_add(d.balance))
        .ok_or_else(|| PayoffError::overflow("total principal"))?;

    let mut balances: Vec<WorkingBalance> = debts.iter().map(WorkingBalance::from_debt).collect();
    let mut payoff: Vec<PerDebtOutcome> = debts.iter().map(PerDebtOutcome::open).collect();
    let mut recorder = TimelineRecorder::with_capacity(horizon.cap() as usize);

    debug!(debts = debts.len(), %strategy, %extra, "starting payoff simulation");

    let mut month: u32 = 0;
    while horizon.should_continue(month, &balances) {
        let accrual = accrue_month(&mut balances, extra, strategy, config.epsilon)?;
        record_payoffs(&balances, &mut payoff, month, start_date, config.epsilon)?;
        let date = month_date(start_date, month)?;
        let total_remaining = recorder.record(month, date, accrual, &balances)?;
        trace!(month, %total_remaining, "month simulated");

        month += 1;
        if horizon.is_settled(total_remaining) {
            break;
        }
    }

    if config.attribute_interest {
        for (outcome, wb) in payoff.iter_mut().zip(&balances) {
            outcome.interest_paid = wb.interest_accrued;
        }
    }

    let (timeline, plan, total_interest) = recorder.finish();
    let result = PlanResult {
        months: month,
        total_principal,
        timeline,
        total_interest,
        payoff,
        plan,
    };

    if !result.is_debt_free(config.epsilon) {
        warn!(
            months = result.months,
            remaining = %result.final_balance(),
            "horizon reached before payoff"
        );
    }
    debug!(months = result.months, %total_interest, "payoff simulation finished");

    Ok(result)
}

/// Simulate one plan from loosely-typed input.
///
/// Malformed debt rows are dropped with a warning; an empty debt list gives a
/// zero-month plan. Inputs that never converge run to the month cap and the
/// result keeps its residual balance.
pub fn simulate_plan(input: &PlanInput) -> PayoffResult<ComputationOutput<PlanResult>> {
    let start = Instant::now();

    let prepared = prepare_plan(input)?;
    let result = prepared.simulate()?;

    let mut warnings = prepared.warnings.clone();
    warnings.extend(prepared.outcome_warnings(&result));

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Debt Payoff Simulation (monthly compounding, extra cascades by strategy)",
        &prepared.assumptions(),
        warnings,
        elapsed,
        result,
    ))
}
