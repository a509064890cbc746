//! Table controller error types

use super::Error;

/// Errors surfaced by an [`EntityTableConfig`](crate::table::EntityTableConfig).
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Fetching a page from the resource failed.
    #[error("failed to fetch page: {0}")]
    FetchFailed(Error),

    /// A row or header action ran and failed.
    #[error("action failed: {0}")]
    ActionFailed(ActionError),

    /// The named action does not exist or is disabled for the current context.
    #[error("action '{0}' is not available")]
    ActionUnavailable(String),

    /// The row index is outside the current page.
    #[error("row {0} is not on the current page")]
    RowOutOfRange(usize),
}

/// The side effect of a row or header action failed.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A REST call made by the action failed.
    #[error(transparent)]
    Request(#[from] Error),

    /// The action gave up for another reason.
    #[error("{0}")]
    Message(String),
}

impl From<ActionError> for TableError {
    fn from(err: ActionError) -> Self {
        Self::ActionFailed(err)
    }
}

impl ActionError {
    /// Creates an action error from a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<super::ApiError> for ActionError {
    fn from(err: super::ApiError) -> Self {
        Self::Request(Error::Api(err))
    }
}

impl From<super::ValidationError> for ActionError {
    fn from(err: super::ValidationError) -> Self {
        Self::Request(Error::Validation(err))
    }
}
