//! Auth API collaborator seam
//!
//! This module defines the trait the backend authentication service is
//! reached through, so the session manager depends only on an interface:
//! [`SimulatedApi`] is the deterministic stand-in used while the real
//! backend is absent (and in tests), and [`HttpApi`] is the JSON client for
//! a real deployment.

mod simulated;

#[cfg(feature = "http")]
mod http;

pub use simulated::{DEV_EMAIL, DEV_PASSWORD, DEV_TOKEN, SimulatedApi};

#[cfg(feature = "http")]
pub use http::{DEFAULT_BASE_URL, HttpApi};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{Token, User};

/// Errors the auth collaborator can report.
///
/// `CredentialsRejected` is user-correctable (retry with different input);
/// `Internal` is a transient service or transport problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("credentials rejected by the auth service")]
    CredentialsRejected,

    #[error("auth service internal failure: {reason}")]
    Internal { reason: String },
}

impl ApiError {
    /// Check if this error is a user-correctable rejection.
    pub fn is_credentials_rejected(&self) -> bool {
        matches!(self, ApiError::CredentialsRejected)
    }

    /// Internal-failure error with the given reason.
    pub fn internal(reason: impl Into<String>) -> Self {
        ApiError::Internal {
            reason: reason.into(),
        }
    }
}

// Conversion from ApiError to the main Error type
impl From<ApiError> for crate::Error {
    fn from(err: ApiError) -> Self {
        crate::Error::Api(err)
    }
}

/// Identity and token returned by a successful login exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: User,
    pub token: Token,
}

/// Payload collected by the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationData {
    pub name: String,
    pub identification: String,
    pub email: String,
    pub password: String,
}

/// Acknowledgement of a created account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationAck {
    /// Server-assigned id of the new account.
    pub user_id: String,
}

/// Backend contract for authentication exchanges.
///
/// Registration does not log the new account in; a successful
/// [`register`](AuthApi::register) is only an acknowledgement. The
/// admin-existence query is independent of the login/register operations and
/// may resolve at any time.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for an identity and a session token.
    async fn login(&self, email: &str, password: &str) -> Result<Credentials, ApiError>;

    /// Creates a new account.
    async fn register(&self, data: &RegistrationData) -> Result<RegistrationAck, ApiError>;

    /// Whether an administrator account already exists.
    async fn check_admin_exists(&self) -> Result<bool, ApiError>;
}
