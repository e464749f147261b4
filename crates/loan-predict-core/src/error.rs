use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanPredictError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Application store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanPredictError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanPredictError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for errors the caller should answer by re-prompting for input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, LoanPredictError::InvalidInput { .. })
    }
}

impl From<serde_json::Error> for LoanPredictError {
    fn from(e: serde_json::Error) -> Self {
        LoanPredictError::SerializationError(e.to_string())
    }
}
