//! Username/password login against the broker's auth endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::RwLock;

use super::AccessToken;
use super::TokenProvider;
use crate::error::AuthError;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    refresh_token: Option<String>,
}

/// Logs in with a username and password and caches the issued token.
///
/// # Example
///
/// ```ignore
/// use mqtt_console_lib::auth::PasswordLogin;
/// use mqtt_console_lib::BrokerClient;
///
/// let login = PasswordLogin::new("sysadmin@thingsboard.org", "sysadmin");
///
/// let client = BrokerClient::builder()
///     .url("http://localhost:8083")
///     .token_provider(login)
///     .build()?;
/// ```
pub struct PasswordLogin {
    username: String,
    password: String,
    http_client: reqwest::Client,
    token: RwLock<Option<AccessToken>>,
}

impl PasswordLogin {
    /// Creates a login flow for the given user.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            http_client: reqwest::Client::new(),
            token: RwLock::new(None),
        }
    }

    /// Uses a custom HTTP client for the login request.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }

    /// Posts the credentials to `/api/auth/login` and returns the issued token.
    pub async fn authenticate(&self, base_url: &str) -> Result<AccessToken, AuthError> {
        let url = format!("{}/api/auth/login", base_url.trim_end_matches('/'));
        log::debug!("logging in as {} at {}", self.username, url);

        let response = self
            .http_client
            .post(&url)
            .json(&LoginRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await?;

        match response.status().as_u16() {
            200..=299 => {
                let body: LoginResponse = response
                    .json()
                    .await
                    .map_err(|e| AuthError::Parse(e.to_string()))?;
                Ok(AccessToken {
                    access_token: body.token,
                    expires_at: None,
                    refresh_token: body.refresh_token,
                })
            }
            401 => Err(AuthError::InvalidCredentials),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::Parse(format!("login failed with HTTP {status}: {body}")))
            }
        }
    }

    /// Drops the cached token so the next request logs in again.
    pub async fn invalidate(&self) {
        *self.token.write().await = None;
    }
}

#[async_trait]
impl TokenProvider for PasswordLogin {
    async fn get_token(&self, base_url: &str) -> Result<AccessToken, AuthError> {
        {
            let guard = self.token.read().await;
            if let Some(token) = guard.as_ref()
                && !token.is_expired()
            {
                return Ok(token.clone());
            }
        }

        let token = self.authenticate(base_url).await?;
        *self.token.write().await = Some(token.clone());
        Ok(token)
    }
}
