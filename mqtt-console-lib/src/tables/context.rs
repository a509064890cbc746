//! Services shared by the broker tables.

use std::sync::Arc;

use async_trait::async_trait;

use crate::BrokerClient;
use crate::error::ActionError;
use crate::i18n::Catalog;
use crate::i18n::Translator;
use crate::model::DetailedClientSessionInfo;
use crate::model::ShortMqttClientCredentials;
use crate::notify::LogSink;
use crate::notify::Notification;
use crate::notify::NotificationSink;

/// Documentation page for client sessions.
pub const SESSIONS_HELP_URL: &str = "https://thingsboard.io/docs/mqtt-broker/user-guide/ui/sessions/";

/// Opens external links.
pub trait Navigator: Send + Sync {
    fn open(&self, url: &str) -> Result<(), ActionError>;
}

/// Interactive prompts raised by row actions.
#[async_trait]
pub trait Dialogs: Send + Sync {
    /// Asks the operator to confirm a destructive action.
    async fn confirm(&self, title: &str, message: &str) -> bool;

    /// Collects a new password for `credentials`. `None` means the operator
    /// cancelled.
    async fn change_password(
        &self,
        credentials: &ShortMqttClientCredentials,
    ) -> Option<PasswordChange>;

    /// Shows a session until the operator closes it.
    async fn session_details(&self, session: &DetailedClientSessionInfo);
}

/// Values entered in the change-password prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirmation: String,
}

/// Logs links instead of opening them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn open(&self, url: &str) -> Result<(), ActionError> {
        log::info!("open {url}");
        Ok(())
    }
}

/// Declines every prompt. Used where nobody can answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineDialogs;

#[async_trait]
impl Dialogs for DeclineDialogs {
    async fn confirm(&self, title: &str, _message: &str) -> bool {
        log::debug!("declining '{title}'");
        false
    }

    async fn change_password(
        &self,
        _credentials: &ShortMqttClientCredentials,
    ) -> Option<PasswordChange> {
        None
    }

    async fn session_details(&self, _session: &DetailedClientSessionInfo) {}
}

/// Everything a broker table needs besides its rows.
///
/// Cheap to clone; actions capture their own copy.
#[derive(Clone)]
pub struct ConsoleContext {
    pub client: BrokerClient,
    pub translator: Arc<dyn Translator>,
    pub notifier: Arc<dyn NotificationSink>,
    pub navigator: Arc<dyn Navigator>,
    pub dialogs: Arc<dyn Dialogs>,
}

impl ConsoleContext {
    /// English labels, log notifications, no prompts.
    pub fn new(client: BrokerClient) -> Self {
        Self {
            client,
            translator: Arc::new(Catalog::english()),
            notifier: Arc::new(LogSink),
            navigator: Arc::new(LogNavigator),
            dialogs: Arc::new(DeclineDialogs),
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_dialogs(mut self, dialogs: Arc<dyn Dialogs>) -> Self {
        self.dialogs = dialogs;
        self
    }

    /// Asks for confirmation, titled with the translation of `key`.
    pub(crate) async fn confirm(&self, key: &str, subject: &str) -> bool {
        let title = self.translator.translate(key);
        self.dialogs.confirm(&title, subject).await
    }

    /// Sends the translation of `key` as a success notification.
    pub(crate) fn success(&self, key: &str) {
        self.notifier
            .notify(Notification::success(self.translator.translate(key)));
    }
}
