use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayoffError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PayoffError {
    pub(crate) fn overflow(context: &str) -> Self {
        PayoffError::NumericOverflow {
            context: context.to_string(),
        }
    }
}

impl From<serde_json::Error> for PayoffError {
    fn from(e: serde_json::Error) -> Self {
        PayoffError::SerializationError(e.to_string())
    }
}
