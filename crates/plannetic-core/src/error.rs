use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanneticError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Provider error: {provider} — {reason}")]
    ProviderError { provider: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PlanneticError {
    fn from(e: serde_json::Error) -> Self {
        PlanneticError::SerializationError(e.to_string())
    }
}
