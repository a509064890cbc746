//! Retained messages table.

use crate::api::RETAINED_MESSAGES_PATH;
use crate::fetcher::ApiFetcher;
use crate::format::format_timestamp;
use crate::model::RetainedMessage;
use crate::table::ActionDescriptor;
use crate::table::ActionOutcome;
use crate::table::ColumnDescriptor;
use crate::table::EntityTableConfig;

use super::ConsoleContext;

pub const DELETE_RETAINED_ACTION: &str = "retained-message.delete";

pub fn retained_messages_table(ctx: &ConsoleContext) -> EntityTableConfig<RetainedMessage> {
    EntityTableConfig::builder(ApiFetcher::new(ctx.client.clone(), RETAINED_MESSAGES_PATH))
        .title("retained-message.retained-messages")
        .entity_translations("retained-message.no-retained-messages", "retained-message.search")
        .column(
            ColumnDescriptor::new("createdTime", "common.created-time", "15%")
                .value(|message: &RetainedMessage| format_timestamp(message.created_time).into()),
        )
        .column(ColumnDescriptor::new("topic", "retained-message.topic", "35%"))
        .column(
            ColumnDescriptor::new("qos", "retained-message.qos", "10%")
                .value(|message: &RetainedMessage| u8::from(message.qos).to_string().into()),
        )
        .column(ColumnDescriptor::new("payload", "retained-message.payload", "40%"))
        .row_action(delete_action(ctx))
        .translator(ctx.translator.clone())
        .notifier(ctx.notifier.clone())
        .build()
}

fn delete_action(ctx: &ConsoleContext) -> ActionDescriptor<RetainedMessage> {
    let ctx = ctx.clone();
    ActionDescriptor::new(DELETE_RETAINED_ACTION, "delete", move |message: RetainedMessage| {
        let ctx = ctx.clone();
        async move {
            if !ctx.confirm(DELETE_RETAINED_ACTION, &message.topic).await {
                return Ok(ActionOutcome::None);
            }
            ctx.client.delete_retained_message(&message.topic).await?;
            ctx.success("retained-message.deleted");
            Ok(ActionOutcome::Reload)
        }
    })
}
