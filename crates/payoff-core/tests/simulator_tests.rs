use chrono::NaiveDate;
use payoff_core::payoff::{self, simulate_debts, simulate_plan, Debt, PlanInput, PlanResult, SimulationConfig};
use payoff_core::{PayoffError, Strategy};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn run(debts: &[Debt], extra: Decimal, strategy: Strategy) -> PlanResult {
    simulate_debts(debts, extra, strategy, start(), &SimulationConfig::default()).unwrap()
}

fn two_card_debts() -> Vec<Debt> {
    vec![
        Debt::new("x", "Debt X", dec!(1000), dec!(20), dec!(50)),
        Debt::new("y", "Debt Y", dec!(500), dec!(10), dec!(50)),
    ]
}

// ===========================================================================
// Trivial and degenerate inputs
// ===========================================================================

#[test]
fn test_empty_debt_list_is_trivial() {
    let input: PlanInput = serde_json::from_value(json!({
        "debts": [],
        "extra": 500,
        "strategy": "avalanche",
        "start_date": "2024-01-01"
    }))
    .unwrap();
    let result = simulate_plan(&input).unwrap().result;
    assert_eq!(result.months, 0);
    assert!(result.timeline.is_empty());
    assert!(result.plan.is_empty());
    assert_eq!(result.total_interest, Decimal::ZERO);
}

#[test]
fn test_fully_invalid_debt_list_is_trivial_with_warnings() {
    let input: PlanInput = serde_json::from_value(json!({
        "debts": [
            {"id": "1", "name": "Paid", "balance": 0, "apr": 10, "min": 10},
            {"id": "2", "name": "Typo", "balance": "n/a", "apr": 10, "min": 10}
        ],
        "extra": 100,
        "start_date": "2024-01-01"
    }))
    .unwrap();
    let output = simulate_plan(&input).unwrap();
    assert_eq!(output.result, PlanResult::empty());
    assert_eq!(output.warnings.len(), 2);
}

// ===========================================================================
// Concrete scenarios
// ===========================================================================

#[test]
fn test_scenario_a_single_debt_first_month() {
    let debts = vec![Debt::new("a", "Card", dec!(1200), dec!(12), dec!(100))];
    let result = run(&debts, Decimal::ZERO, Strategy::Avalanche);

    let first = &result.plan[0];
    assert_eq!(first.interest, dec!(12));
    assert_eq!(first.payments, vec![dec!(100)]);
    assert_eq!(first.remaining, vec![dec!(1112)]);
    assert_eq!(first.total_remaining, dec!(1112));
    assert_eq!(result.timeline[0].total_remaining, dec!(1112));
}

#[test]
fn test_scenario_b_avalanche_extra_goes_to_highest_apr() {
    let debts = two_card_debts();
    let result = run(&debts, dec!(200), Strategy::Avalanche);

    let first = &result.plan[0];
    assert_eq!(first.payments, vec![dec!(250), dec!(50)]);

    let x_interest = dec!(1000) * debts[0].monthly_rate();
    let y_interest = dec!(500) * debts[1].monthly_rate();
    assert_eq!(first.remaining[0], dec!(1000) + x_interest - dec!(250));
    assert_eq!(first.remaining[1], dec!(500) + y_interest - dec!(50));
    assert_eq!(first.interest, x_interest + y_interest);
}

#[test]
fn test_scenario_c_non_convergent_debt_hits_cap() {
    let debts = vec![Debt::new("c", "Underwater", dec!(10000), dec!(24), dec!(10))];
    let output = simulate_plan(
        &PlanInput::new(debts, Decimal::ZERO, Strategy::Avalanche).with_start_date(start()),
    )
    .unwrap();
    let result = &output.result;

    assert_eq!(result.months, 600);
    assert_eq!(result.plan.len(), 600);
    assert_eq!(result.payoff[0].payoff_month_index, None);
    assert_eq!(result.payoff[0].payoff_date, None);
    assert!(result.final_balance() > dec!(10000));
    assert!(!result.is_debt_free(payoff::horizon::DEFAULT_EPSILON));
    assert!(output
        .warnings
        .iter()
        .any(|w| w.contains("Horizon of 600 months reached")));
    assert!(output
        .warnings
        .iter()
        .any(|w| w.contains("does not cover first-month interest")));
}

#[test]
fn test_custom_horizon_cap() {
    let debts = vec![Debt::new("c", "Underwater", dec!(10000), dec!(24), dec!(10))];
    let config = SimulationConfig {
        horizon_months: 12,
        ..SimulationConfig::default()
    };
    let result = simulate_debts(&debts, Decimal::ZERO, Strategy::Avalanche, start(), &config).unwrap();
    assert_eq!(result.months, 12);
    assert_eq!(result.plan.last().unwrap().month_index, 11);
}

// ===========================================================================
// Invariants
// ===========================================================================

#[test]
fn test_total_interest_equals_sum_of_monthly_interest() {
    let result = run(&two_card_debts(), dec!(75), Strategy::Snowball);
    let summed: Decimal = result.plan.iter().map(|row| row.interest).sum();
    assert_eq!(result.total_interest, summed);
    let from_timeline: Decimal = result.timeline.iter().map(|p| p.interest).sum();
    assert_eq!(result.total_interest, from_timeline);
}

#[test]
fn test_balances_never_increase() {
    for strategy in [Strategy::Avalanche, Strategy::Snowball] {
        let result = run(&two_card_debts(), dec!(120), strategy);
        for pair in result.plan.windows(2) {
            assert!(pair[1].total_remaining <= pair[0].total_remaining);
            for (after, before) in pair[1].remaining.iter().zip(&pair[0].remaining) {
                assert!(after <= before);
                assert!(*after >= Decimal::ZERO);
            }
        }
    }
}

#[test]
fn test_plan_reaches_zero_and_stops() {
    let result = run(&two_card_debts(), dec!(200), Strategy::Avalanche);
    let last = result.plan.last().unwrap();
    assert!(last.total_remaining <= dec!(0.0001));
    assert_eq!(result.months as usize, result.plan.len());
    assert!(result
        .payoff
        .iter()
        .all(|o| o.payoff_month_index.is_some_and(|m| m < result.months)));
}

#[test]
fn test_zero_extra_pays_only_minimums() {
    let debts = two_card_debts();
    let result = run(&debts, Decimal::ZERO, Strategy::Avalanche);

    let mut previous: Vec<Decimal> = debts.iter().map(|d| d.balance).collect();
    for row in &result.plan {
        for (idx, debt) in debts.iter().enumerate() {
            if previous[idx].is_zero() {
                assert_eq!(row.payments[idx], Decimal::ZERO);
                continue;
            }
            let owed = previous[idx] + previous[idx] * debt.monthly_rate();
            assert_eq!(row.payments[idx], debt.minimum.min(owed));
        }
        previous = row.remaining.clone();
    }
}

#[test]
fn test_avalanche_focuses_extra_until_target_closes() {
    let debts = two_card_debts();
    let result = run(&debts, dec!(200), Strategy::Avalanche);
    let x_closed = result.payoff[0].payoff_month_index.unwrap();

    // Until X closes, Y only ever receives its minimum
    for row in result.plan.iter().take(x_closed as usize) {
        assert_eq!(row.payments[1], dec!(50));
    }
    // Y closes after X
    assert!(result.payoff[1].payoff_month_index.unwrap() >= x_closed);
}

#[test]
fn test_snowball_targets_smallest_balance_first() {
    let debts = two_card_debts();
    let result = run(&debts, dec!(200), Strategy::Snowball);

    let first = &result.plan[0];
    assert_eq!(first.payments, vec![dec!(50), dec!(250)]);
    assert!(result.payoff[1].payoff_month_index < result.payoff[0].payoff_month_index);
}

#[test]
fn test_tie_break_prefers_input_order() {
    let debts = vec![
        Debt::new("first", "First", dec!(800), dec!(15), dec!(25)),
        Debt::new("second", "Second", dec!(800), dec!(15), dec!(25)),
    ];
    for strategy in [Strategy::Avalanche, Strategy::Snowball] {
        let result = run(&debts, dec!(100), strategy);
        assert_eq!(result.plan[0].payments, vec![dec!(125), dec!(25)]);
    }
}

#[test]
fn test_overflow_cascades_within_the_month() {
    // Snowball: the 60 debt closes on 10 minimum + 50 of the extra, the other 150 flows to the next
    let debts = vec![
        Debt::new("big", "Big", dec!(2000), Decimal::ZERO, dec!(40)),
        Debt::new("tiny", "Tiny", dec!(60), Decimal::ZERO, dec!(10)),
    ];
    let result = run(&debts, dec!(200), Strategy::Snowball);
    let first = &result.plan[0];
    assert_eq!(first.payments, vec![dec!(190), dec!(60)]);
    assert_eq!(first.remaining, vec![dec!(1810), Decimal::ZERO]);
    assert_eq!(result.payoff[1].payoff_month_index, Some(0));
    assert_eq!(result.payoff[1].payoff_date, NaiveDate::from_ymd_opt(2024, 2, 1));
}

#[test]
fn test_simulation_is_pure() {
    let input = PlanInput::new(two_card_debts(), dec!(150), Strategy::Snowball).with_start_date(start());
    let first = simulate_plan(&input).unwrap().result;
    let second = simulate_plan(&input).unwrap().result;
    assert_eq!(first, second);
}

#[test]
fn test_payoff_outcomes_follow_input_order() {
    let result = run(&two_card_debts(), dec!(200), Strategy::Snowball);
    let ids: Vec<&str> = result.payoff.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["x", "y"]);
    assert_eq!(result.payoff[0].starting_balance, dec!(1000));
    assert_eq!(result.total_principal, dec!(1500));
    assert!(result.payoff.iter().all(|o| o.interest_paid.is_zero()));
}

// ===========================================================================
// Numeric limits
// ===========================================================================

#[test]
fn test_huge_balances_report_overflow_instead_of_panicking() {
    let input: PlanInput = serde_json::from_value(json!({
        "debts": [
            {"id": "a", "name": "A", "balance": "50000000000000000000000000000", "apr": 0, "min": 1},
            {"id": "b", "name": "B", "balance": "50000000000000000000000000000", "apr": 0, "min": 1}
        ],
        "extra": 0,
        "start_date": "2024-01-01"
    }))
    .unwrap();
    let err = simulate_plan(&input).unwrap_err();
    assert!(matches!(err, PayoffError::NumericOverflow { .. }), "{err}");
}

#[test]
fn test_huge_apr_reports_overflow_during_preparation() {
    let input: PlanInput = serde_json::from_value(json!({
        "debts": [{"id": "a", "name": "A", "balance": "70000000000000000000000000000", "apr": 12000, "min": 1}],
        "extra": 0,
        "start_date": "2024-01-01"
    }))
    .unwrap();
    assert!(matches!(
        simulate_plan(&input),
        Err(PayoffError::NumericOverflow { .. })
    ));
}

#[test]
fn test_negative_minimum_on_typed_debt_never_raises_balance() {
    let debts = vec![Debt::new("a", "A", dec!(300), dec!(0), dec!(-40))];
    let result = run(&debts, dec!(100), Strategy::Avalanche);
    assert_eq!(result.months, 3);
    for row in &result.plan {
        assert!(row.payments.iter().all(|p| *p >= Decimal::ZERO));
    }
    for pair in result.plan.windows(2) {
        assert!(pair[1].total_remaining <= pair[0].total_remaining);
    }
    assert_eq!(result.plan[0].payments, vec![dec!(100)]);
}
