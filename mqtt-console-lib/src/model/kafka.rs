//! Kafka models

use serde::Deserialize;
use serde::Serialize;

/// A Kafka topic backing the broker's queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaTopic {
    pub name: String,
    pub partitions: u32,
    pub replication_factor: u32,
    /// Size on disk in bytes.
    pub size: u64,
}

/// A Kafka consumer group and how far behind it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaConsumerGroup {
    pub group_id: String,
    pub state: String,
    pub members: u32,
    pub lag: u64,
}
