//!
//! Session lifecycle management.
//!
//! `SessionManager` owns the authentication state machine: it restores a
//! persisted session at startup, runs login/register/logout against the auth
//! collaborator, keeps the persisted token and user in lockstep with every
//! transition, and publishes an immutable [`Session`] snapshot to
//! subscribers after each one.

mod errors;
mod snapshot;

pub use errors::SessionError;
pub use snapshot::{NavTarget, Session, SessionState, Token, User};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::{
    Result,
    constants::{TOKEN_KEY, USER_KEY},
    storage::Storage,
    transport::{ApiError, AuthApi, Credentials, RegistrationData},
};

// Operation outcome messages, published as the session status message.
pub const MSG_LOGIN_SUCCESS: &str = "Inicio de sesión exitoso. Redirigiendo…";
pub const MSG_CREDENTIALS_REJECTED: &str = "Credenciales incorrectas.";
pub const MSG_INTERNAL_ERROR: &str = "Error interno. Intenta de nuevo más tarde.";
pub const MSG_REGISTER_SUCCESS: &str =
    "Usuario creado correctamente. Redirigiendo al inicio de sesión.";
pub const MSG_REGISTER_FAILED: &str = "No se pudo completar el registro. Intenta de nuevo.";
pub const MSG_LOGOUT: &str = "Sesión cerrada correctamente.";

/// Callback invoked with every published snapshot.
pub type SessionCallback = Arc<dyn Fn(&Session) + Send + Sync>;

/// Failure of a settled login/register exchange, after the busy flag has
/// done its job but before the final snapshot is published.
enum OpFailure {
    Rejected,
    Internal(crate::Error),
}

/// Internal state for SessionManager
///
/// This structure holds the actual implementation data for SessionManager.
/// SessionManager itself is a cheap-to-clone handle wrapping
/// `Arc<SessionInternal>`.
struct SessionInternal {
    /// Durable store for the token/user pair
    storage: Arc<dyn Storage>,
    /// Auth backend collaborator
    api: Arc<dyn AuthApi>,
    /// Snapshot fields other than the loading flag
    record: Mutex<SessionRecord>,
    /// At most one login/register exchange may be in flight
    busy: AtomicBool,
    /// Subscribers receiving every published snapshot
    subscribers: Mutex<Vec<SessionCallback>>,
}

#[derive(Default)]
struct SessionRecord {
    state: SessionState,
    user: Option<User>,
    status_message: Option<String>,
    nav: Option<NavTarget>,
}

impl std::fmt::Debug for SessionInternal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionInternal")
            .field("storage", &"<dyn Storage>")
            .field("api", &"<dyn AuthApi>")
            .field("state", &self.record.lock().unwrap().state)
            .field("busy", &self.busy.load(Ordering::Relaxed))
            .field(
                "subscribers",
                &format!("<{} subscribers>", self.subscribers.lock().unwrap().len()),
            )
            .finish()
    }
}

/// Client-side authentication session manager.
///
/// Constructed once at process start with [`SessionManager::open`] and
/// passed by reference (or cheaply cloned) to every consumer; there is no
/// ambient global. Consumers read [`snapshot`](SessionManager::snapshot),
/// register callbacks with [`subscribe`](SessionManager::subscribe), and
/// drive the lifecycle with `login`, `register` and `logout`.
///
/// ## Example
///
/// ```
/// # use std::sync::Arc;
/// # use pfeps_session::{SessionManager, storage::InMemory, transport::SimulatedApi};
/// # #[tokio::main]
/// # async fn main() -> pfeps_session::Result<()> {
/// let api = Arc::new(SimulatedApi::instant());
/// let session = SessionManager::open(Arc::new(InMemory::new()), api);
///
/// session.login("test@pfeps.com", "123456").await?;
/// assert!(session.snapshot().user.is_some());
/// session.logout();
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct SessionManager {
    inner: Arc<SessionInternal>,
}

impl SessionManager {
    /// Opens the manager over `storage` and `api`, restoring any persisted
    /// session.
    ///
    /// Restore never fails: a persisted token whose companion user record
    /// is missing or does not deserialize is treated as a corrupted session
    /// and silently cleared, leaving the manager anonymous. The restored
    /// snapshot (including the navigation signal for a restored
    /// authenticated session) is readable immediately; subscribers attach
    /// afterwards.
    pub fn open(storage: Arc<dyn Storage>, api: Arc<dyn AuthApi>) -> Self {
        let manager = Self {
            inner: Arc::new(SessionInternal {
                storage,
                api,
                record: Mutex::new(SessionRecord::default()),
                busy: AtomicBool::new(false),
                subscribers: Mutex::new(Vec::new()),
            }),
        };
        manager.restore_session();
        manager
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Session {
        self.inner.snapshot()
    }

    /// True while a login or registration exchange is in flight.
    pub fn is_loading(&self) -> bool {
        self.inner.busy.load(Ordering::Acquire)
    }

    /// Registers `callback` to receive every subsequently published
    /// snapshot.
    pub fn subscribe(&self, callback: SessionCallback) {
        self.inner.subscribers.lock().unwrap().push(callback);
    }

    /// Runs the login exchange for `email`/`password`.
    ///
    /// Rejects with [`SessionError::OperationInFlight`] (and no other side
    /// effects) while another login or registration attempt is running.
    /// Publishes `Authenticating` with a cleared status message before the
    /// exchange; afterwards either persists the credentials and publishes
    /// `Authenticated` with a navigation signal to the authenticated area,
    /// or publishes `AuthenticationFailed` with the rejection or
    /// internal-failure message and persists nothing. The busy flag is
    /// released on every exit path.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let busy = self.inner.acquire_busy()?;
        self.inner.publish(|record| {
            record.state = SessionState::Authenticating;
            record.user = None;
            record.status_message = None;
            record.nav = None;
        });
        tracing::debug!(email, "starting login exchange");

        let outcome = match self.inner.api.login(email, password).await {
            Ok(credentials) => match self.inner.persist_credentials(&credentials) {
                Ok(()) => Ok(credentials.user),
                Err(err) => Err(OpFailure::Internal(err)),
            },
            Err(ApiError::CredentialsRejected) => Err(OpFailure::Rejected),
            Err(err) => Err(OpFailure::Internal(err.into())),
        };
        // Release before the final publish so the settled snapshot is not
        // marked loading.
        drop(busy);

        match outcome {
            Ok(user) => {
                tracing::info!(user = %user.email, "login succeeded");
                self.inner.publish(move |record| {
                    record.state = SessionState::Authenticated;
                    record.user = Some(user);
                    record.status_message = Some(MSG_LOGIN_SUCCESS.to_string());
                    record.nav = Some(NavTarget::AuthenticatedArea);
                });
                Ok(())
            }
            Err(OpFailure::Rejected) => {
                tracing::info!(email, "login rejected");
                self.inner.publish(|record| {
                    record.state = SessionState::AuthenticationFailed;
                    record.user = None;
                    record.status_message = Some(MSG_CREDENTIALS_REJECTED.to_string());
                    record.nav = None;
                });
                Err(ApiError::CredentialsRejected.into())
            }
            Err(OpFailure::Internal(err)) => {
                tracing::warn!(%err, "login failed internally");
                self.inner.publish(|record| {
                    record.state = SessionState::AuthenticationFailed;
                    record.user = None;
                    record.status_message = Some(MSG_INTERNAL_ERROR.to_string());
                    record.nav = None;
                });
                Err(err)
            }
        }
    }

    /// Runs the registration exchange for `data`.
    ///
    /// Same mutual exclusion and transition shape as
    /// [`login`](SessionManager::login), but success does not start a
    /// session: the state returns to `Anonymous` with a confirmation
    /// message and a navigation signal back to the login view. Nothing is
    /// persisted.
    pub async fn register(&self, data: RegistrationData) -> Result<()> {
        let busy = self.inner.acquire_busy()?;
        self.inner.publish(|record| {
            record.state = SessionState::Authenticating;
            record.user = None;
            record.status_message = None;
            record.nav = None;
        });
        tracing::debug!(email = data.email.as_str(), "starting registration exchange");

        let outcome = self.inner.api.register(&data).await;
        drop(busy);

        match outcome {
            Ok(ack) => {
                tracing::info!(user_id = ack.user_id.as_str(), "registration acknowledged");
                self.inner.publish(|record| {
                    record.state = SessionState::Anonymous;
                    record.user = None;
                    record.status_message = Some(MSG_REGISTER_SUCCESS.to_string());
                    record.nav = Some(NavTarget::Login);
                });
                Ok(())
            }
            Err(ApiError::CredentialsRejected) => {
                tracing::info!(email = data.email.as_str(), "registration rejected");
                self.inner.publish(|record| {
                    record.state = SessionState::AuthenticationFailed;
                    record.user = None;
                    record.status_message = Some(MSG_REGISTER_FAILED.to_string());
                    record.nav = None;
                });
                Err(ApiError::CredentialsRejected.into())
            }
            Err(err) => {
                tracing::warn!(%err, "registration failed internally");
                self.inner.publish(|record| {
                    record.state = SessionState::AuthenticationFailed;
                    record.user = None;
                    record.status_message = Some(MSG_INTERNAL_ERROR.to_string());
                    record.nav = None;
                });
                Err(err.into())
            }
        }
    }

    /// Clears the session synchronously.
    ///
    /// Idempotent: logging out while anonymous publishes the same
    /// confirmation. Storage failures are logged and do not interrupt the
    /// logout.
    pub fn logout(&self) {
        self.inner.clear_persisted();
        self.inner.publish(|record| {
            record.state = SessionState::Anonymous;
            record.user = None;
            record.status_message = Some(MSG_LOGOUT.to_string());
            record.nav = Some(NavTarget::Login);
        });
        tracing::info!("session closed");
    }

    /// One-shot session restore, run by [`open`](SessionManager::open).
    fn restore_session(&self) {
        let token = match self.inner.storage.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(%err, "failed to read persisted token");
                None
            }
        };
        // Nothing persisted: stay anonymous without touching storage.
        let Some(_token) = token else {
            return;
        };

        let user = match self.inner.storage.get(USER_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<User>(&raw)
                .map_err(|err| {
                    tracing::warn!(%err, "persisted user record does not deserialize");
                    err
                })
                .ok(),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(%err, "failed to read persisted user");
                None
            }
        };

        match user {
            Some(user) => {
                tracing::info!(user = %user.email, "restored persisted session");
                self.inner.publish(move |record| {
                    record.state = SessionState::Authenticated;
                    record.user = Some(user);
                    record.nav = Some(NavTarget::AuthenticatedArea);
                });
            }
            None => {
                // Token without a usable user record: corrupted session.
                // Clear it as an implicit logout, with no status message.
                tracing::warn!("persisted session is corrupt, clearing");
                self.inner.clear_persisted();
            }
        }
    }
}

impl SessionInternal {
    fn acquire_busy(&self) -> Result<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SessionError::OperationInFlight)?;
        Ok(BusyGuard { flag: &self.busy })
    }

    fn snapshot(&self) -> Session {
        let record = self.record.lock().unwrap();
        Session {
            state: record.state,
            user: record.user.clone(),
            is_loading: self.busy.load(Ordering::Acquire),
            status_message: record.status_message.clone(),
            nav: record.nav,
        }
    }

    /// Applies `mutate` to the record and hands the resulting snapshot to
    /// every subscriber.
    fn publish(&self, mutate: impl FnOnce(&mut SessionRecord)) {
        let snapshot = {
            let mut record = self.record.lock().unwrap();
            mutate(&mut record);
            Session {
                state: record.state,
                user: record.user.clone(),
                is_loading: self.busy.load(Ordering::Acquire),
                status_message: record.status_message.clone(),
                nav: record.nav,
            }
        };
        let subscribers = self.subscribers.lock().unwrap().clone();
        for callback in &subscribers {
            callback(&snapshot);
        }
    }

    /// Writes token and user as one transition step; a partial write is
    /// rolled back so no half-session is ever persisted.
    fn persist_credentials(&self, credentials: &Credentials) -> Result<()> {
        let serialized = serde_json::to_string(&credentials.user)?;
        let persisted = self
            .storage
            .set(TOKEN_KEY, credentials.token.as_str())
            .and_then(|()| self.storage.set(USER_KEY, &serialized));
        if persisted.is_err() {
            self.clear_persisted();
        }
        persisted
    }

    /// Best-effort removal of both session keys.
    fn clear_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.storage.remove(key) {
                tracing::warn!(key, %err, "failed to clear persisted session key");
            }
        }
    }
}

/// Releases the busy flag when the in-flight operation settles, on every
/// exit path.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
