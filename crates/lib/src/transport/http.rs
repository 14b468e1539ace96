//! HTTP implementation of the auth API collaborator
//!
//! JSON client over the backend's auth endpoints using reqwest.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ApiError, AuthApi, Credentials, RegistrationAck, RegistrationData};

/// Base URL of the backend auth endpoints in a local deployment.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/auth";

/// Auth backend reached over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Client against the default local backend.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against `base_url` (no trailing slash).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn classify_status(status: reqwest::StatusCode) -> ApiError {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            ApiError::CredentialsRejected
        } else {
            ApiError::internal(format!("auth service returned {status}"))
        }
    }
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AdminExistsResponse {
    exists: bool,
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<Credentials, ApiError> {
        let url = format!("{}/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|err| ApiError::internal(err.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::classify_status(response.status()));
        }
        response
            .json()
            .await
            .map_err(|err| ApiError::internal(format!("malformed login response: {err}")))
    }

    async fn register(&self, data: &RegistrationData) -> Result<RegistrationAck, ApiError> {
        let url = format!("{}/register", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(data)
            .send()
            .await
            .map_err(|err| ApiError::internal(err.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::classify_status(response.status()));
        }
        response
            .json()
            .await
            .map_err(|err| ApiError::internal(format!("malformed register response: {err}")))
    }

    async fn check_admin_exists(&self) -> Result<bool, ApiError> {
        let url = format!("{}/admin-exists", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::internal(err.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::classify_status(response.status()));
        }
        let body: AdminExistsResponse = response
            .json()
            .await
            .map_err(|err| ApiError::internal(format!("malformed admin-exists response: {err}")))?;
        Ok(body.exists)
    }
}
