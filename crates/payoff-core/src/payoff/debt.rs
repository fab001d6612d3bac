use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::PayoffError;
use crate::types::{Money, Percent, Rate};
use crate::PayoffResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A debt row exactly as a form or saved file hands it over.
///
/// Every field is kept as a loose JSON value; `normalize_debts` owns the
/// coercion rules so that malformed rows degrade instead of failing the parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDebt {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub balance: Value,
    #[serde(default)]
    pub apr: Value,
    #[serde(default, alias = "minimum")]
    pub min: Value,
    #[serde(default, alias = "due_day")]
    pub due_day: Value,
}

/// A simulation-ready liability. The simulator never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Opaque, caller-assigned identifier.
    pub id: String,
    pub name: String,
    pub balance: Money,
    /// Annual percentage rate in percent units.
    pub apr: Percent,
    /// Fixed monthly minimum payment.
    pub minimum: Money,
    /// Informational only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_day: Option<u8>,
}

impl Debt {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        balance: Money,
        apr: Percent,
        minimum: Money,
    ) -> Self {
        Debt {
            id: id.into(),
            name: name.into(),
            balance,
            apr,
            minimum,
            due_day: None,
        }
    }

    /// Periodic rate: APR / 100 / 12.
    pub fn monthly_rate(&self) -> Rate {
        self.apr / dec!(100) / dec!(12)
    }

    /// Interest the opening balance accrues in the first simulated month.
    pub fn first_month_interest(&self) -> PayoffResult<Money> {
        self.balance
            .checked_mul(self.monthly_rate())
            .ok_or_else(|| PayoffError::overflow("first-month interest"))
    }
}

impl From<Debt> for RawDebt {
    fn from(debt: Debt) -> Self {
        RawDebt {
            id: Value::String(debt.id),
            name: Value::String(debt.name),
            balance: Value::String(debt.balance.to_string()),
            apr: Value::String(debt.apr.to_string()),
            min: Value::String(debt.minimum.to_string()),
            due_day: debt.due_day.map(Value::from).unwrap_or(Value::Null),
        }
    }
}

/// Simulation-local shadow of one debt's balance. Owned by a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingBalance {
    pub apr: Percent,
    pub monthly_rate: Rate,
    pub minimum: Money,
    pub balance: Money,
    /// Interest accrued on this debt so far in the run.
    pub interest_accrued: Money,
}

impl WorkingBalance {
    /// Negative rates and minimums are floored at zero; payments never add
    /// to a balance.
    pub fn from_debt(debt: &Debt) -> Self {
        WorkingBalance {
            apr: debt.apr,
            monthly_rate: debt.monthly_rate().max(Decimal::ZERO),
            minimum: debt.minimum.max(Decimal::ZERO),
            balance: debt.balance,
            interest_accrued: Decimal::ZERO,
        }
    }

    pub fn is_open(&self) -> bool {
        self.balance > Decimal::ZERO
    }
}

/// A row the normalizer refused, with the rule it failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedDebt {
    pub position: usize,
    pub id: String,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDebts {
    pub debts: Vec<Debt>,
    pub dropped: Vec<DroppedDebt>,
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Coerce a loose JSON value to a decimal. Anything unusable becomes zero.
pub fn coerce_number(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        Value::Bool(true) => Decimal::ONE,
        _ => Decimal::ZERO,
    }
}

fn parse_decimal(s: &str) -> Decimal {
    if s.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .unwrap_or(Decimal::ZERO)
}

/// Coerce a loose JSON value to display text.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn coerce_due_day(value: &Value) -> Option<u8> {
    let day = coerce_number(value);
    if day.fract().is_zero() && day >= Decimal::ONE && day <= dec!(31) {
        day.to_u8()
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Filter raw rows down to the debts the simulator can run.
///
/// Keeps rows with balance > 0, APR >= 0 and minimum >= 0, in input order.
/// Unusable rows are dropped, never rejected.
pub fn normalize_debts(raw: &[RawDebt]) -> NormalizedDebts {
    let mut out = NormalizedDebts::default();

    for (position, row) in raw.iter().enumerate() {
        let debt = Debt {
            id: coerce_text(&row.id),
            name: coerce_text(&row.name),
            balance: coerce_number(&row.balance),
            apr: coerce_number(&row.apr),
            minimum: coerce_number(&row.min),
            due_day: coerce_due_day(&row.due_day),
        };

        let reason = if debt.balance <= Decimal::ZERO {
            Some("balance must be greater than zero")
        } else if debt.apr < Decimal::ZERO {
            Some("apr must not be negative")
        } else if debt.minimum < Decimal::ZERO {
            Some("minimum payment must not be negative")
        } else {
            None
        };

        match reason {
            Some(reason) => out.dropped.push(DroppedDebt {
                position,
                id: debt.id,
                name: debt.name,
                reason: reason.to_string(),
            }),
            None => out.debts.push(debt),
        }
    }

    out
}
