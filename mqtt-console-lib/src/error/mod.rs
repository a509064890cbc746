//! Error types

mod api;
mod auth;
mod table;
mod validation;

pub use api::*;
pub use auth::*;
pub use table::*;
pub use validation::*;

/// Top-level error for client and fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The broker REST API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Authentication failed or no usable token was available.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A request was rejected before it was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Returns `true` if repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_retryable(),
            Self::Auth(AuthError::Network(_)) => true,
            _ => false,
        }
    }
}
