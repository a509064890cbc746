//! Kafka inspection operations

use crate::BrokerClient;
use crate::error::Error;
use crate::model::KafkaConsumerGroup;
use crate::model::KafkaTopic;
use crate::page::PageData;
use crate::page::TimePageLink;

/// Collection path for Kafka topics.
pub const KAFKA_TOPICS_PATH: &str = "/api/app/kafka-topic";

/// Collection path for Kafka consumer groups.
pub const KAFKA_CONSUMER_GROUPS_PATH: &str = "/api/app/kafka-consumer-group";

impl BrokerClient {
    /// Lists the Kafka topics used by the broker.
    pub async fn kafka_topics(&self, link: &TimePageLink) -> Result<PageData<KafkaTopic>, Error> {
        self.get_json(KAFKA_TOPICS_PATH, &link.query_pairs()).await
    }

    /// Lists the Kafka consumer groups used by the broker.
    pub async fn kafka_consumer_groups(
        &self,
        link: &TimePageLink,
    ) -> Result<PageData<KafkaConsumerGroup>, Error> {
        self.get_json(KAFKA_CONSUMER_GROUPS_PATH, &link.query_pairs())
            .await
    }
}
