use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::Validation {
            field,
            reason: reason.into(),
        }
    }
}
