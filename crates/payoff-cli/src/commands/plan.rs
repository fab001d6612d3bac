use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use payoff_core::comparison::{baseline, strategies};
use payoff_core::insights::{self, InsightsInput};
use payoff_core::payoff::{self, PlanInput, RawDebt};
use payoff_core::Strategy;

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Avalanche,
    Snowball,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Avalanche => Strategy::Avalanche,
            StrategyArg::Snowball => Strategy::Snowball,
        }
    }
}

/// Arguments shared by every plan command
#[derive(Args)]
pub struct PlanArgs {
    /// Path to a JSON or YAML plan file (debts, extra, strategy, start_date, config)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON or YAML file holding just the debt list
    #[arg(long)]
    pub debts: Option<String>,

    /// Monthly budget on top of the minimum payments
    #[arg(long)]
    pub extra: Option<Decimal>,

    /// Which open debt receives the extra first
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// First month of the plan (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Month cap for the simulation (default 600)
    #[arg(long)]
    pub horizon_months: Option<u32>,

    /// Report per-debt accrued interest instead of zero
    #[arg(long)]
    pub attribute_interest: bool,
}

/// Arguments for plan insights
#[derive(Args)]
pub struct InsightsArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Share of starting principal a month's extra must reach to extend the streak
    #[arg(long)]
    pub streak_floor_ratio: Option<Decimal>,
}

/// Build the plan input: --input file, else piped stdin, else --debts.
/// Individual flags override whatever the document says.
fn resolve_plan_input(args: &PlanArgs) -> Result<PlanInput, Box<dyn std::error::Error>> {
    let piped = if args.input.is_none() {
        input::stdin::read_stdin()?
    } else {
        None
    };
    let mut plan = load_plan_document(args, piped)?;
    apply_overrides(&mut plan, args);

    tracing::debug!(
        debts = plan.debts.len(),
        strategy = %plan.strategy,
        "resolved plan input"
    );
    Ok(plan)
}

fn load_plan_document(
    args: &PlanArgs,
    piped: Option<Value>,
) -> Result<PlanInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return Ok(input::file::read_structured(path)?);
    }
    if let Some(data) = piped {
        return Ok(serde_json::from_value(data)?);
    }

    let path = args
        .debts
        .as_ref()
        .ok_or("--debts <file> is required (or provide --input / stdin)")?;
    let debts: Vec<RawDebt> = input::file::read_structured(path)?;
    Ok(PlanInput {
        debts,
        ..PlanInput::default()
    })
}

fn apply_overrides(plan: &mut PlanInput, args: &PlanArgs) {
    if let Some(extra) = args.extra {
        plan.extra = Value::String(extra.to_string());
    }
    if let Some(strategy) = args.strategy {
        plan.strategy = strategy.into();
    }
    if let Some(start_date) = args.start_date {
        plan.start_date = Some(start_date);
    }
    if let Some(horizon) = args.horizon_months {
        plan.config.horizon_months = horizon;
    }
    if args.attribute_interest {
        plan.config.attribute_interest = true;
    }
}

pub fn run_simulate(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = resolve_plan_input(&args)?;
    let result = payoff::simulate_plan(&plan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = resolve_plan_input(&args)?;
    let result = baseline::compare_plans(&plan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_strategies(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = resolve_plan_input(&args)?;
    let result = strategies::compare_strategies(&plan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_insights(args: InsightsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = resolve_plan_input(&args.plan)?;
    let mut request = InsightsInput::from(plan);
    if let Some(ratio) = args.streak_floor_ratio {
        request.streak_floor_ratio = ratio;
    }
    let result = insights::plan_insights(&request)?;
    Ok(serde_json::to_value(result)?)
}
