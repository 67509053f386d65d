//! Account backend client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::types::{LoginRequest, LoginResponse, ServiceResponse, SignupRequest, SignupResponse};

/// Errors raised before a usable reply is available.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// The user-management backend.
///
/// Non-2xx replies are not errors: they come back with `success == false`
/// and whatever `message` the body carried.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ServiceResponse<LoginResponse>, AuthServiceError>;

    async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ServiceResponse<SignupResponse>, AuthServiceError>;
}

/// [`AuthService`] over the backend's REST users API.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    client: Arc<Client>,
    login_url: Url,
    register_url: Url,
}

impl HttpAuthService {
    /// `base_url` should end with a slash; the paths are joined onto it.
    pub fn new(
        base_url: &str,
        login_path: &str,
        register_path: &str,
        timeout: Duration,
    ) -> Result<Self, AuthServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base = Url::parse(base_url)?;

        Ok(Self {
            client: Arc::new(client),
            login_url: base.join(login_path)?,
            register_url: base.join(register_path)?,
        })
    }

    pub fn login_url(&self) -> &Url {
        &self.login_url
    }

    pub fn register_url(&self) -> &Url {
        &self.register_url
    }

    /// Decode the reply body into `T`, keeping the status outcome. A body
    /// that doesn't decode is treated as carrying no fields.
    async fn read_reply<T>(response: reqwest::Response) -> Result<ServiceResponse<T>, AuthServiceError>
    where
        T: DeserializeOwned + Default,
    {
        let status = response.status();
        let text = response.text().await?;
        let body = match serde_json::from_str::<T>(&text) {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Auth reply ({}) did not decode: {}", status, e);
                T::default()
            }
        };

        Ok(ServiceResponse {
            success: status.is_success(),
            body,
        })
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    #[instrument(skip(self, password), level = "info")]
    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ServiceResponse<LoginResponse>, AuthServiceError> {
        let response = self
            .client
            .post(self.login_url.clone())
            .json(&LoginRequest {
                login: email,
                password,
            })
            .send()
            .await?;

        Self::read_reply(response).await
    }

    #[instrument(skip(self, password), level = "info")]
    async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ServiceResponse<SignupResponse>, AuthServiceError> {
        let response = self
            .client
            .post(self.register_url.clone())
            .json(&SignupRequest { email, password })
            .send()
            .await?;

        Self::read_reply(response).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn joins_paths_onto_base() {
        let service = HttpAuthService::new(
            "https://example.backendless.app/api/",
            "users/login",
            "users/register",
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            service.login_url().as_str(),
            "https://example.backendless.app/api/users/login"
        );
        assert_eq!(
            service.register_url().as_str(),
            "https://example.backendless.app/api/users/register"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = HttpAuthService::new("not a url", "a", "b", Duration::from_secs(5));
        assert!(matches!(result, Err(AuthServiceError::InvalidUrl(_))));
    }
}
