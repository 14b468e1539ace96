//!
//! pfeps-session: client-side identity and session management for the PFEPS
//! electronic-invoicing front end.
//!
//! This library owns the authentication session lifecycle, the persisted
//! session/preference state, and the field validation that gates the
//! role-aware registration workflow. Routing, layout and the real backend
//! service are external collaborators reached through the seams defined here.
//!
//! ## Core Concepts
//!
//! * **SessionManager (`session::SessionManager`)**: The authentication state machine. Restores a persisted session at startup, runs login/register/logout against the auth collaborator, and publishes an immutable `Session` snapshot to subscribers on every transition.
//! * **Storage (`storage::Storage`)**: A pluggable durable key-value layer for the session token, the serialized user and the theme preference. Ships with `InMemory` and a write-through `JsonFile` implementation.
//! * **Validation (`validation`)**: The two-tier field validation engine: `instant_check` per keystroke, `validate` on blur and submit, with per-field errors collected in a `ValidationErrorSet`.
//! * **RegistrationGate (`registration::RegistrationGate`)**: The first-admin bootstrap policy. Keeps the registration form closed until the deployment's admin-existence status is known and rejects disallowed submissions locally.
//! * **AuthApi (`transport::AuthApi`)**: The backend collaborator seam, with a deterministic simulated implementation and an HTTP client.
//! * **ThemePreference (`theme::ThemePreference`)**: The light/dark preference slice, persisted independently of the session.

pub mod constants;
pub mod registration;
pub mod session;
pub mod storage;
pub mod theme;
pub mod transport;
pub mod validation;

/// Re-export the `SessionManager` struct for easier access.
pub use session::SessionManager;

/// Result type used throughout the pfeps-session library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the pfeps-session library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured session errors from the session module
    #[error(transparent)]
    Session(session::SessionError),

    /// Structured storage errors from the storage module
    #[error(transparent)]
    Storage(storage::StorageError),

    /// Structured auth collaborator errors from the transport module
    #[error(transparent)]
    Api(transport::ApiError),

    /// Structured policy gate errors from the registration module
    #[error(transparent)]
    Gate(registration::GateError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Serialize(_) => "serialize",
            Error::Session(_) => "session",
            Error::Storage(_) => "storage",
            Error::Api(_) => "transport",
            Error::Gate(_) => "registration",
        }
    }

    /// Check if this error is the busy-flag rejection of an overlapping
    /// login/register attempt.
    pub fn is_operation_in_flight(&self) -> bool {
        matches!(self, Error::Session(session::SessionError::OperationInFlight))
    }

    /// Check if this error is a user-correctable rejection from the auth
    /// collaborator.
    pub fn is_credentials_rejected(&self) -> bool {
        matches!(self, Error::Api(transport::ApiError::CredentialsRejected))
    }

    /// Check if this error is the policy gate rejecting a registration
    /// submit locally.
    pub fn is_gate_closed(&self) -> bool {
        matches!(self, Error::Gate(registration::GateError::Closed { .. }))
    }

    /// Check if this error is storage-related.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}
