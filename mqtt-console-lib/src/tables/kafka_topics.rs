//! Kafka topics table.

use crate::api::KAFKA_TOPICS_PATH;
use crate::fetcher::ApiFetcher;
use crate::format::format_bytes;
use crate::model::KafkaTopic;
use crate::table::ColumnDescriptor;
use crate::table::EntityTableConfig;

use super::ConsoleContext;

/// Rows per page on the topics table.
pub const KAFKA_TOPICS_PAGE_SIZE: u32 = 5;

pub fn kafka_topics_table(ctx: &ConsoleContext) -> EntityTableConfig<KafkaTopic> {
    EntityTableConfig::builder(ApiFetcher::new(ctx.client.clone(), KAFKA_TOPICS_PATH))
        .title("kafka.topics")
        .entity_translations("kafka.no-kafka-topic-text", "kafka.topics-search")
        .default_page_size(KAFKA_TOPICS_PAGE_SIZE)
        .column(ColumnDescriptor::new("name", "kafka.name", "70%"))
        .column(ColumnDescriptor::new("partitions", "kafka.partitions", "10%"))
        .column(ColumnDescriptor::new("replicationFactor", "kafka.replicas", "10%"))
        .column(
            ColumnDescriptor::new("size", "kafka.size", "10%")
                .value(|topic: &KafkaTopic| format_bytes(topic.size).into()),
        )
        .translator(ctx.translator.clone())
        .notifier(ctx.notifier.clone())
        .build()
}
