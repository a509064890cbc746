//! Retained message operations

use reqwest::Method;

use crate::BrokerClient;
use crate::error::Error;
use crate::model::RetainedMessage;
use crate::page::PageData;
use crate::page::TimePageLink;

/// Collection path for retained messages.
pub const RETAINED_MESSAGES_PATH: &str = "/api/retained-msg/v2";

impl BrokerClient {
    /// Lists retained messages, optionally within a creation-time window.
    pub async fn retained_messages(
        &self,
        link: &TimePageLink,
    ) -> Result<PageData<RetainedMessage>, Error> {
        self.get_json(RETAINED_MESSAGES_PATH, &link.query_pairs())
            .await
    }

    /// Clears the retained message of a topic.
    pub async fn delete_retained_message(&self, topic: &str) -> Result<(), Error> {
        self.send::<()>(
            Method::DELETE,
            "/api/retained-msg",
            &[("topicName", topic.to_string())],
            None,
        )
        .await
    }
}
