//! Session state types published to consumers

use serde::{Deserialize, Serialize};

/// Authentication lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session; the login form is the entry point.
    #[default]
    Anonymous,
    /// A login or registration exchange is in flight.
    Authenticating,
    /// A user is signed in; token and user are persisted.
    Authenticated,
    /// The last login or registration attempt failed.
    AuthenticationFailed,
}

/// Where the consumer should navigate after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// The signed-in area of the application.
    AuthenticatedArea,
    /// The login view.
    Login,
}

/// Identity record returned by the auth collaborator.
///
/// Immutable once constructed; owned by the session. Serialized as JSON
/// under the `user` storage key with the field names the front end has
/// historically persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub email: String,
}

/// Opaque session credential.
///
/// Written to and cleared from storage in lockstep with the session state;
/// never published to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wraps an opaque token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Immutable view of the session, published on every transition.
///
/// `user` is present exactly when `state` is
/// [`SessionState::Authenticated`]. The session token does not appear here;
/// it stays between the manager and its storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub state: SessionState,
    pub user: Option<User>,
    /// True while a login or registration exchange is in flight.
    pub is_loading: bool,
    /// Outcome of the last session operation, for the UI to render.
    pub status_message: Option<String>,
    /// Navigation requested by the transition that produced this snapshot.
    pub nav: Option<NavTarget>,
}
