//! Kafka consumer groups table.

use crate::api::KAFKA_CONSUMER_GROUPS_PATH;
use crate::fetcher::ApiFetcher;
use crate::model::KafkaConsumerGroup;
use crate::table::Alignment;
use crate::table::ColumnDescriptor;
use crate::table::EntityTableConfig;

use super::ConsoleContext;

pub fn kafka_consumer_groups_table(ctx: &ConsoleContext) -> EntityTableConfig<KafkaConsumerGroup> {
    EntityTableConfig::builder(ApiFetcher::new(
        ctx.client.clone(),
        KAFKA_CONSUMER_GROUPS_PATH,
    ))
    .title("kafka.consumer-groups")
    .entity_translations("kafka.no-kafka-consumer-group-text", "kafka.consumer-groups-search")
    .column(ColumnDescriptor::new("groupId", "kafka.id", "70%"))
    .column(ColumnDescriptor::new("state", "kafka.state", "10%"))
    .column(ColumnDescriptor::new("members", "kafka.members", "10%").align(Alignment::Right))
    .column(
        ColumnDescriptor::new("lag", "kafka.lag", "10%")
            .value(|group: &KafkaConsumerGroup| group.lag.to_string().into())
            .align(Alignment::Right),
    )
    .translator(ctx.translator.clone())
    .notifier(ctx.notifier.clone())
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnWidth;
    use crate::tables::test_context;

    #[test]
    fn test_columns() {
        let table = kafka_consumer_groups_table(&test_context());
        let columns: Vec<_> = table
            .columns()
            .iter()
            .map(|c| (c.key.as_str(), c.width, c.align))
            .collect();
        assert_eq!(
            columns,
            [
                ("groupId", ColumnWidth::Percent(70), Alignment::Left),
                ("state", ColumnWidth::Percent(10), Alignment::Left),
                ("members", ColumnWidth::Percent(10), Alignment::Right),
                ("lag", ColumnWidth::Percent(10), Alignment::Right),
            ]
        );
        assert!(table.row_actions().is_empty());
        assert!(table.flags().search_enabled);
    }
}
