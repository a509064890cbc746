//! Retained message model

use serde::Deserialize;
use serde::Serialize;

use super::MqttQoS;

/// The last retained message stored for a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetainedMessage {
    pub topic: String,
    #[serde(default)]
    pub payload: String,
    pub qos: MqttQoS,
    /// Epoch milliseconds.
    pub created_time: i64,
}
