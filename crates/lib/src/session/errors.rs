//! Error types for the session module
use thiserror::Error;

use crate::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The busy flag rejected an overlapping login/register attempt. The
    /// rejected call has no side effects; retry once the in-flight
    /// operation settles.
    #[error("a login or registration attempt is already in flight")]
    OperationInFlight,
}

// Conversion from SessionError to the main Error type
impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Error::Session(err)
    }
}
