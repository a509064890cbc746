//! Validation error types

use chrono::DateTime;
use chrono::Utc;

/// A request or form value that was rejected before reaching the broker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A time window whose start lies after its end.
    #[error("start time {start} is after end time {end}")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The new password and its confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// A required field was empty.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}
