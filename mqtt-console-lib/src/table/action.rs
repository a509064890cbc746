//! Row and header action descriptors.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::ActionError;

/// What the table should do once an action has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionOutcome {
    /// Leave the current page as it is.
    #[default]
    None,
    /// The action changed server state; fetch the current page again.
    Reload,
}

/// Future returned by an action handler.
pub type ActionFuture = BoxFuture<'static, Result<ActionOutcome, ActionError>>;

pub(crate) type ActionHandler<C> = Arc<dyn Fn(C) -> ActionFuture + Send + Sync>;
type EnabledPredicate<C> = Arc<dyn Fn(&C) -> bool + Send + Sync>;

/// Context passed to header actions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderContext {
    /// Indices of the selected rows on the current page.
    pub selected: Vec<usize>,
    /// Rows on the current page.
    pub page_len: usize,
    /// Elements across all pages.
    pub total_elements: u64,
}

/// A named action bound to a row (`C` = row type) or to the table header
/// (`C` = [`HeaderContext`]).
///
/// `is_enabled` is evaluated against the current context every time the table
/// is rendered or the action is invoked.
///
/// # Example
///
/// ```
/// use mqtt_console_lib::model::{ConnectionState, ShortClientSessionInfo};
/// use mqtt_console_lib::table::{ActionDescriptor, ActionOutcome};
///
/// let disconnect = ActionDescriptor::new(
///     "mqtt-client-session.disconnect",
///     "portable_wifi_off",
///     |session: ShortClientSessionInfo| async move {
///         // call the broker here
///         Ok(ActionOutcome::Reload)
///     },
/// )
/// .enabled_when(|session| session.connection_state == ConnectionState::Connected);
/// ```
pub struct ActionDescriptor<C> {
    /// Translation key, also the name the action is invoked by.
    pub name: String,
    pub icon: String,
    /// The icon comes from the Material Design Icons set.
    pub is_mdi_icon: bool,
    is_enabled: EnabledPredicate<C>,
    on_action: ActionHandler<C>,
}

impl<C: 'static> ActionDescriptor<C> {
    /// Creates an always-enabled action.
    pub fn new<F, Fut>(name: impl Into<String>, icon: impl Into<String>, on_action: F) -> Self
    where
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ActionOutcome, ActionError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            icon: icon.into(),
            is_mdi_icon: false,
            is_enabled: Arc::new(|_: &C| true),
            on_action: boxed_handler(on_action),
        }
    }

    /// Restricts the action to contexts matching `predicate`.
    pub fn enabled_when(mut self, predicate: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        self.is_enabled = Arc::new(predicate);
        self
    }

    /// Marks the icon as a Material Design Icons name.
    pub fn mdi_icon(mut self) -> Self {
        self.is_mdi_icon = true;
        self
    }

    /// Evaluates the enabled predicate for `context`.
    pub fn is_enabled(&self, context: &C) -> bool {
        (self.is_enabled)(context)
    }

    /// Starts the action for `context`.
    pub(crate) fn invoke(&self, context: C) -> ActionFuture {
        (self.on_action)(context)
    }
}

/// Boxes an async closure into a shareable handler.
pub(crate) fn boxed_handler<C, F, Fut>(f: F) -> ActionHandler<C>
where
    F: Fn(C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ActionOutcome, ActionError>> + Send + 'static,
{
    Arc::new(move |context| f(context).boxed())
}
