//! TokenProvider trait and AccessToken

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::error::AuthError;

/// A JWT access token issued by the broker, with an optional refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The bearer token sent with every API call.
    pub access_token: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
    /// Refresh token returned by the login endpoint.
    pub refresh_token: Option<String>,
}

impl AccessToken {
    /// Creates a new access token with just the token string.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
            refresh_token: None,
        }
    }

    /// Creates a new access token with expiration time.
    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
            refresh_token: None,
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Value for the broker's `X-Authorization` header.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Trait for providing access tokens to the [`BrokerClient`](crate::BrokerClient).
///
/// The client calls `get_token` before each API request. Implementations
/// should return cached tokens when valid and log in again when needed.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets an access token for the broker at `base_url`.
    async fn get_token(&self, base_url: &str) -> Result<AccessToken, AuthError>;
}

/// A token provider that always returns the same token.
///
/// # Example
///
/// ```
/// use mqtt_console_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("eyJhbGciOiJIUzUxMiJ9...");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a new static token provider with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }

    /// Creates a new static token provider from an existing AccessToken.
    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, _base_url: &str) -> Result<AccessToken, AuthError> {
        if self.token.is_expired() {
            return Err(AuthError::TokenExpired {
                message: "static token is past its expiry".to_string(),
            });
        }
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_value() {
        assert_eq!(AccessToken::new("abc").as_bearer(), "Bearer abc");
    }

    #[tokio::test]
    async fn test_static_provider_rejects_expired_token() {
        let expired = AccessToken::with_expiry("abc", Utc::now() - chrono::Duration::minutes(1));
        let provider = StaticTokenProvider::from_token(expired);
        let err = provider.get_token("http://localhost:8083").await.unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired { .. }));
    }

    #[tokio::test]
    async fn test_static_provider_returns_token() {
        let provider = StaticTokenProvider::new("abc");
        let token = provider.get_token("http://localhost:8083").await.unwrap();
        assert_eq!(token.access_token, "abc");
    }
}
