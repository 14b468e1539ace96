//! Shared factories and doubles for the integration suite.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use pfeps_session::{
    SessionManager,
    storage::InMemory,
    transport::{ApiError, AuthApi, Credentials, RegistrationAck, RegistrationData, SimulatedApi},
};

/// Fresh in-memory store.
pub fn test_storage() -> Arc<InMemory> {
    Arc::new(InMemory::new())
}

/// Session manager over a fresh in-memory store and a zero-delay simulated
/// backend; also returns the store for persistence assertions.
pub fn open_session() -> (SessionManager, Arc<InMemory>) {
    let storage = test_storage();
    let session = SessionManager::open(storage.clone(), Arc::new(SimulatedApi::instant()));
    (session, storage)
}

/// Registration payload that passes full validation.
pub fn valid_registration() -> RegistrationData {
    RegistrationData {
        name: "María Pérez".to_string(),
        identification: "1102233445".to_string(),
        email: "maria@pfeps.com".to_string(),
        password: "123456".to_string(),
    }
}

/// Scripted auth collaborator double.
///
/// Wraps the zero-delay simulated backend, records how often each operation
/// is invoked, and can be configured to hold the login exchange open until
/// released or to fail individual operations.
pub struct RecordingApi {
    inner: SimulatedApi,
    pub login_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
    pub admin_calls: AtomicUsize,
    hold_login: bool,
    release: Notify,
    fail_login: bool,
    fail_admin_check: bool,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self {
            inner: SimulatedApi::instant(),
            login_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            admin_calls: AtomicUsize::new(0),
            hold_login: false,
            release: Notify::new(),
            fail_login: false,
            fail_admin_check: false,
        }
    }

    /// Double whose login waits for [`RecordingApi::release_login`] before
    /// settling.
    pub fn holding_login() -> Self {
        Self {
            hold_login: true,
            ..Self::new()
        }
    }

    /// Double whose login fails with an internal error.
    pub fn failing_login() -> Self {
        Self {
            fail_login: true,
            ..Self::new()
        }
    }

    /// Double whose admin-existence query fails.
    pub fn failing_admin_check() -> Self {
        Self {
            fail_admin_check: true,
            ..Self::new()
        }
    }

    pub fn release_login(&self) {
        self.release.notify_one();
    }

    pub fn set_admin_exists(&self, exists: bool) {
        self.inner.set_admin_exists(exists);
    }
}

#[async_trait]
impl AuthApi for RecordingApi {
    async fn login(&self, email: &str, password: &str) -> Result<Credentials, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if self.hold_login {
            self.release.notified().await;
        }
        if self.fail_login {
            return Err(ApiError::internal("simulated outage"));
        }
        self.inner.login(email, password).await
    }

    async fn register(&self, data: &RegistrationData) -> Result<RegistrationAck, ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.register(data).await
    }

    async fn check_admin_exists(&self) -> Result<bool, ApiError> {
        self.admin_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_admin_check {
            return Err(ApiError::internal("simulated outage"));
        }
        self.inner.check_admin_exists().await
    }
}
