//! Translation of label keys.

use std::collections::HashMap;

/// Resolves translation keys such as `kafka.name` to display text.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Leaves every key untranslated.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// A key → text table. Unknown keys translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one entry.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Returns `true` if the catalog has text for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The built-in English catalog.
    pub fn english() -> Self {
        let mut catalog = Self::new();
        for (key, text) in ENGLISH {
            catalog.insert(*key, *text);
        }
        catalog
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

const ENGLISH: &[(&str, &str)] = &[
    ("help.goto-help-page", "Go to help page"),
    ("common.created-time", "Created time"),
    ("login.passwords-mismatch-error", "Entered passwords must be same!"),
    // sessions
    ("mqtt-client-session.type-sessions", "Sessions"),
    ("mqtt-client-session.no-session-text", "No sessions found"),
    ("mqtt-client-session.search", "Search sessions"),
    ("mqtt-client-session.connect", "Connection state"),
    ("mqtt-client-session.connected", "Connected"),
    ("mqtt-client-session.disconnected", "Disconnected"),
    ("mqtt-client-session.node-id", "Node ID"),
    ("mqtt-client-session.disconnect", "Disconnect client"),
    ("mqtt-client-session.remove", "Remove session"),
    ("mqtt-client-session.session-disconnected", "Client disconnected"),
    ("mqtt-client-session.session-removed", "Session removed"),
    ("mqtt-client.client-id", "Client ID"),
    ("mqtt-client.client-type", "Client type"),
    ("mqtt-client.device", "Device"),
    ("mqtt-client.application", "Application"),
    // credentials
    ("mqtt-client-credentials.client-credentials", "Client credentials"),
    ("mqtt-client-credentials.no-client-credentials-text", "No client credentials found"),
    ("mqtt-client-credentials.search", "Search client credentials"),
    ("mqtt-client-credentials.name", "Name"),
    ("mqtt-client-credentials.type", "Credentials type"),
    ("mqtt-client-credentials.type-basic", "MQTT Basic"),
    ("mqtt-client-credentials.type-ssl", "X.509 Certificate chain"),
    ("mqtt-client-credentials.change-password", "Change password"),
    ("mqtt-client-credentials.password-changed", "Password successfully changed"),
    ("mqtt-client-credentials.delete", "Delete client credentials"),
    ("mqtt-client-credentials.deleted", "Client credentials deleted"),
    // kafka
    ("kafka.topics", "Topics"),
    ("kafka.consumer-groups", "Consumer groups"),
    ("kafka.name", "Name"),
    ("kafka.partitions", "Partitions"),
    ("kafka.replicas", "Replicas"),
    ("kafka.size", "Size"),
    ("kafka.no-kafka-topic-text", "No Kafka topics found"),
    ("kafka.topics-search", "Search topics"),
    ("kafka.id", "ID"),
    ("kafka.state", "State"),
    ("kafka.members", "Members"),
    ("kafka.lag", "Lag"),
    ("kafka.no-kafka-consumer-group-text", "No consumer groups found"),
    ("kafka.consumer-groups-search", "Search consumer groups"),
    // retained messages
    ("retained-message.retained-messages", "Retained messages"),
    ("retained-message.no-retained-messages", "No retained messages found"),
    ("retained-message.search", "Search retained messages"),
    ("retained-message.topic", "Topic"),
    ("retained-message.qos", "QoS"),
    ("retained-message.payload", "Payload"),
    ("retained-message.delete", "Delete retained message"),
    ("retained-message.deleted", "Retained message deleted"),
    // monitoring
    ("overview.incoming-messages", "Incoming messages"),
    ("overview.outgoing-messages", "Outgoing messages"),
    ("overview.dropped-messages", "Dropped messages"),
    ("overview.sessions", "Sessions"),
    ("overview.subscriptions", "Subscriptions"),
    ("overview.incoming-messages-tooltip", "Messages received by the broker"),
    ("overview.outgoing-messages-tooltip", "Messages sent by the broker"),
    ("overview.dropped-messages-tooltip", "Messages dropped by the broker"),
    ("overview.sessions-tooltip", "Client sessions"),
    ("overview.subscriptions-tooltip", "Client subscriptions"),
];
