use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates in percent units (22.99 = 22.99%), as users enter them.
pub type Percent = Decimal;

/// Periodic rates expressed as decimals (0.01 = 1% per month).
pub type Rate = Decimal;

/// Prioritisation rule for the extra payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest APR first.
    #[default]
    Avalanche,
    /// Smallest balance first.
    Snowball,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_serde_tags() {
        let s: Strategy = serde_json::from_str("\"snowball\"").unwrap();
        assert_eq!(s, Strategy::Snowball);
        assert_eq!(
            serde_json::to_string(&Strategy::Avalanche).unwrap(),
            "\"avalanche\""
        );
        assert!(serde_json::from_str::<Strategy>("\"tsunami\"").is_err());
    }

    #[test]
    fn test_default_strategy_is_avalanche() {
        assert_eq!(Strategy::default(), Strategy::Avalanche);
        assert_eq!(Strategy::Snowball.to_string(), "snowball");
    }
}
