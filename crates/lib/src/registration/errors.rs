//! Error types for the registration policy gate
use thiserror::Error;

use super::GateClosedReason;
use crate::Error;

#[derive(Debug, Error)]
pub enum GateError {
    /// The policy gate rejected the submission locally; the auth
    /// collaborator was not invoked.
    #[error("registration is closed: {reason}")]
    Closed { reason: GateClosedReason },

    #[error("{fields} field(s) still have validation errors")]
    ValidationPending { fields: usize },
}

impl GateError {
    /// The gate reason when the submission was rejected by policy.
    pub fn closed_reason(&self) -> Option<GateClosedReason> {
        match self {
            GateError::Closed { reason } => Some(*reason),
            GateError::ValidationPending { .. } => None,
        }
    }
}

// Conversion from GateError to the main Error type
impl From<GateError> for Error {
    fn from(err: GateError) -> Self {
        Error::Gate(err)
    }
}
