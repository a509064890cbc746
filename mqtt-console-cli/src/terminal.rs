//! Terminal implementations of the console's interactive services.

use std::io::BufRead;
use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use mqtt_console_lib::error::ActionError;
use mqtt_console_lib::format::format_timestamp;
use mqtt_console_lib::i18n::Translator;
use mqtt_console_lib::model::DetailedClientSessionInfo;
use mqtt_console_lib::model::ShortMqttClientCredentials;
use mqtt_console_lib::notify::Notification;
use mqtt_console_lib::notify::NotificationLevel;
use mqtt_console_lib::notify::NotificationSink;
use mqtt_console_lib::tables::Dialogs;
use mqtt_console_lib::tables::Navigator;
use mqtt_console_lib::tables::PasswordChange;

/// Prints notifications; errors and warnings go to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&self, notification: Notification) {
        log::info!("notification: {:?} {}", notification.level, notification.message);
        match notification.level {
            NotificationLevel::Info | NotificationLevel::Success => {
                println!("{}", notification.message)
            }
            NotificationLevel::Warning => eprintln!("warning: {}", notification.message),
            NotificationLevel::Error => eprintln!("error: {}", notification.message),
        }
    }
}

/// Opens links in the system browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open(&self, url: &str) -> Result<(), ActionError> {
        open::that(url).map_err(|e| ActionError::message(format!("cannot open {url}: {e}")))
    }
}

/// Answers prompts from stdin, or from values given on the command line.
#[derive(Clone)]
pub struct TerminalDialogs {
    /// Confirm without asking.
    pub assume_yes: bool,
    /// Answer to the change-password prompt.
    pub password_change: Option<PasswordChange>,
    /// Labels for session details.
    pub translator: Arc<dyn Translator>,
}

#[async_trait]
impl Dialogs for TerminalDialogs {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let prompt = format!("{title}: {message}? [y/N] ");
        let answer = tokio::task::spawn_blocking(move || read_line(&prompt))
            .await
            .ok()
            .flatten()
            .unwrap_or_default();
        matches!(answer.trim(), "y" | "Y" | "yes")
    }

    async fn change_password(
        &self,
        _credentials: &ShortMqttClientCredentials,
    ) -> Option<PasswordChange> {
        self.password_change.clone()
    }

    async fn session_details(&self, session: &DetailedClientSessionInfo) {
        print!("{}", describe_session(session, self.translator.as_ref()));
    }
}

fn read_line(prompt: &str) -> Option<String> {
    let mut stdout = std::io::stdout();
    stdout.write_all(prompt.as_bytes()).ok()?;
    stdout.flush().ok()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).ok()?;
    Some(line)
}

/// Multi-line description of a session, including its subscriptions.
pub fn describe_session(session: &DetailedClientSessionInfo, translator: &dyn Translator) -> String {
    let mut out = String::new();
    let mut field = |name: &str, value: String| {
        out.push_str(&format!("{name:<24}{value}\n"));
    };
    field("Client ID", session.client_id.clone());
    field(
        "Connection state",
        translator.translate(session.connection_state.translation_key()),
    );
    field("Client type", translator.translate(session.client_type.translation_key()));
    field("Node ID", session.node_id.clone().unwrap_or_default());
    field("Clean start", session.clean_start.to_string());
    field(
        "Keep alive (s)",
        session
            .keep_alive_seconds
            .map(|s| s.to_string())
            .unwrap_or_default(),
    );
    field(
        "Session expiry (s)",
        session
            .session_expiry_interval
            .map(|s| s.to_string())
            .unwrap_or_default(),
    );
    field(
        "Connected at",
        session.connected_at.map(format_timestamp).unwrap_or_default(),
    );
    field(
        "Disconnected at",
        session
            .disconnected_at
            .map(format_timestamp)
            .unwrap_or_default(),
    );
    field("Subscriptions", session.subscriptions.len().to_string());
    for subscription in &session.subscriptions {
        let share = subscription
            .share_name
            .as_deref()
            .map(|name| format!(" (shared: {name})"))
            .unwrap_or_default();
        out.push_str(&format!("  {} [QoS {}]{share}\n", subscription.topic, subscription.qos));
    }
    out
}
