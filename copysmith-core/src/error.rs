use thiserror::Error;

use crate::ai::AiError;

/// Failure of a remote generation request.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Missing fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Upstream returned status {status}")]
    Upstream { status: u16, body: String },

    #[error("{0}")]
    Unexpected(String),
}

impl From<AiError> for GenerateError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Upstream { status, body } => GenerateError::Upstream { status, body },
            other => GenerateError::Unexpected(other.to_string()),
        }
    }
}
