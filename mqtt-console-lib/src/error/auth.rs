//! Authentication error types

/// Errors that can occur while obtaining or using an access token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid username or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The token was rejected by the broker.
    #[error("Token expired: {message}")]
    TokenExpired { message: String },

    /// No token has been configured.
    #[error("No access token configured")]
    MissingToken,

    /// Network error during authentication.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),
}
