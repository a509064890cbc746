//! Client session models

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Whether a client currently holds a connection to the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

impl ConnectionState {
    /// Translation key for the state label.
    pub fn translation_key(&self) -> &'static str {
        match self {
            Self::Connected => "mqtt-client-session.connected",
            Self::Disconnected => "mqtt-client-session.disconnected",
        }
    }

    /// Display colour for the state.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Connected => "#008A00",
            Self::Disconnected => "#757575",
        }
    }
}

/// Kind of MQTT client, which decides how its messages are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientType {
    Device,
    Application,
}

impl ClientType {
    /// Translation key for the client type label.
    pub fn translation_key(&self) -> &'static str {
        match self {
            Self::Device => "mqtt-client.device",
            Self::Application => "mqtt-client.application",
        }
    }
}

/// MQTT quality-of-service level, carried as `0`, `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MqttQoS {
    AtMostOnce,
    AtLeastOnce,
    ExactlyOnce,
}

impl TryFrom<u8> for MqttQoS {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::AtMostOnce),
            1 => Ok(Self::AtLeastOnce),
            2 => Ok(Self::ExactlyOnce),
            other => Err(format!("invalid MQTT QoS level {other}")),
        }
    }
}

impl From<MqttQoS> for u8 {
    fn from(qos: MqttQoS) -> Self {
        match qos {
            MqttQoS::AtMostOnce => 0,
            MqttQoS::AtLeastOnce => 1,
            MqttQoS::ExactlyOnce => 2,
        }
    }
}

impl std::fmt::Display for MqttQoS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::AtMostOnce => "0 - At most once",
            Self::AtLeastOnce => "1 - At least once",
            Self::ExactlyOnce => "2 - Exactly once",
        };
        f.write_str(label)
    }
}

/// A topic filter a client is subscribed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSubscription {
    pub topic: String,
    pub qos: MqttQoS,
    /// Shared-subscription group, for `$share/<name>/...` filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_name: Option<String>,
}

/// Session row as listed in the sessions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortClientSessionInfo {
    pub client_id: String,
    pub connection_state: ConnectionState,
    pub client_type: ClientType,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub subscriptions_count: Option<u32>,
    #[serde(default)]
    pub connected_at: Option<i64>,
    #[serde(default)]
    pub disconnected_at: Option<i64>,
}

/// Full session state shown in the details view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedClientSessionInfo {
    pub client_id: String,
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub connection_state: ConnectionState,
    pub client_type: ClientType,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub clean_start: bool,
    #[serde(default)]
    pub keep_alive_seconds: Option<u32>,
    #[serde(default)]
    pub session_expiry_interval: Option<u32>,
    #[serde(default)]
    pub connected_at: Option<i64>,
    #[serde(default)]
    pub disconnected_at: Option<i64>,
    #[serde(default)]
    pub subscriptions: Vec<TopicSubscription>,
}
