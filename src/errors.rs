use thiserror::Error;

use crate::intake::fields::FieldErrors;
use crate::transport::TransportError;

/// Error type that captures intake, submission and configuration failures.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error("Not signed in: an identity token is required before submitting")]
    Unauthenticated,
    #[error("Submission is only available from the final section (currently on `{step}`)")]
    NotAtFinalStep { step: &'static str },
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<FieldErrors> for IntakeError {
    fn from(errors: FieldErrors) -> Self {
        IntakeError::Validation(errors)
    }
}

impl IntakeError {
    /// Field-scoped messages when the error is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            IntakeError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
