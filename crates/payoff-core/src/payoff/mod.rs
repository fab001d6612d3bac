pub mod accrual;
pub mod debt;
pub mod horizon;
pub mod simulator;
pub mod strategy;
pub mod timeline;

pub use debt::{normalize_debts, Debt, RawDebt};
pub use simulator::{
    prepare_plan, simulate_debts, simulate_plan, PerDebtOutcome, PlanInput, PlanResult,
    PreparedPlan, SimulationConfig,
};
pub use timeline::{MonthRow, TimelinePoint};
