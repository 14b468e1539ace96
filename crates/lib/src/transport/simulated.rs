//! Deterministic stand-in for the auth backend
//!
//! Mirrors the backend contract with a configurable artificial delay so
//! loading states can be exercised without a network. Accepts a single
//! fixed development credential pair.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::{ApiError, AuthApi, Credentials, RegistrationAck, RegistrationData};
use crate::session::{Token, User};

/// Email accepted by the simulated login exchange.
pub const DEV_EMAIL: &str = "test@pfeps.com";

/// Password accepted by the simulated login exchange.
pub const DEV_PASSWORD: &str = "123456";

/// Token issued by the simulated login exchange.
pub const DEV_TOKEN: &str = "mock-jwt-token-12345";

/// Simulated auth backend with a fixed credential pair and a timed delay.
#[derive(Debug)]
pub struct SimulatedApi {
    delay: Duration,
    admin_exists: AtomicBool,
}

impl SimulatedApi {
    /// Simulated backend with the default two-second exchange delay.
    pub fn new() -> Self {
        Self::with_delay(Duration::from_secs(2))
    }

    /// Simulated backend with a custom exchange delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            admin_exists: AtomicBool::new(false),
        }
    }

    /// Zero-delay backend, for tests.
    pub fn instant() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    /// Sets whether the simulated deployment already has an administrator.
    pub fn set_admin_exists(&self, exists: bool) {
        self.admin_exists.store(exists, Ordering::Relaxed);
    }

    async fn simulate_exchange(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for SimulatedApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthApi for SimulatedApi {
    async fn login(&self, email: &str, password: &str) -> Result<Credentials, ApiError> {
        self.simulate_exchange().await;
        if email == DEV_EMAIL && password == DEV_PASSWORD {
            Ok(Credentials {
                user: User {
                    id: "1".to_string(),
                    display_name: "Usuario Prueba".to_string(),
                    email: email.to_string(),
                },
                token: Token::new(DEV_TOKEN),
            })
        } else {
            Err(ApiError::CredentialsRejected)
        }
    }

    async fn register(&self, _data: &RegistrationData) -> Result<RegistrationAck, ApiError> {
        self.simulate_exchange().await;
        Ok(RegistrationAck {
            user_id: Uuid::new_v4().to_string(),
        })
    }

    async fn check_admin_exists(&self) -> Result<bool, ApiError> {
        self.simulate_exchange().await;
        Ok(self.admin_exists.load(Ordering::Relaxed))
    }
}
