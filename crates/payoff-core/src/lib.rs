pub mod error;
pub mod payoff;
pub mod types;

#[cfg(feature = "comparison")]
pub mod comparison;

#[cfg(feature = "insights")]
pub mod insights;

pub use error::PayoffError;
pub use types::*;

/// Standard result type for all payoff operations
pub type PayoffResult<T> = Result<T, PayoffError>;
