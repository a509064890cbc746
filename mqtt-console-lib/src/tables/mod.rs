//! Tables over the broker's resources.
//!
//! Each constructor returns a ready [`EntityTableConfig`](crate::table::EntityTableConfig)
//! bound to a [`ConsoleContext`]. Row actions call the broker, report through
//! the context's notifier and ask for a reload when they changed something.

mod client_credentials;
mod context;
mod kafka_consumer_groups;
mod kafka_topics;
mod retained_messages;
mod sessions;

pub use client_credentials::*;
pub use context::*;
pub use kafka_consumer_groups::*;
pub use kafka_topics::*;
pub use retained_messages::*;
pub use sessions::*;

#[cfg(test)]
pub(crate) fn test_context() -> ConsoleContext {
    context_at("http://localhost:8083")
}

#[cfg(test)]
pub(crate) fn context_at(url: &str) -> ConsoleContext {
    use crate::BrokerClient;
    use crate::auth::StaticTokenProvider;

    let client = BrokerClient::builder()
        .url(url)
        .token_provider(StaticTokenProvider::new("test"))
        .build()
        .unwrap();
    ConsoleContext::new(client)
}

/// Answers every confirmation with `answer` and records what was shown.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingDialogs {
    pub(crate) answer: bool,
    pub(crate) confirmed: std::sync::Mutex<Vec<String>>,
    pub(crate) sessions: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
#[async_trait::async_trait]
impl Dialogs for RecordingDialogs {
    async fn confirm(&self, _title: &str, message: &str) -> bool {
        self.confirmed.lock().unwrap().push(message.to_string());
        self.answer
    }

    async fn change_password(
        &self,
        _credentials: &crate::model::ShortMqttClientCredentials,
    ) -> Option<PasswordChange> {
        None
    }

    async fn session_details(&self, session: &crate::model::DetailedClientSessionInfo) {
        self.sessions.lock().unwrap().push(session.client_id.clone());
    }
}
