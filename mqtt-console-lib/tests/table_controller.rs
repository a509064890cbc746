//! Integration tests for the table controller against in-memory fetchers.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use serde::Serialize;
use tokio::sync::oneshot;

use mqtt_console_lib::error::ActionError;
use mqtt_console_lib::error::Error;
use mqtt_console_lib::error::TableError;
use mqtt_console_lib::fetcher::FnFetcher;
use mqtt_console_lib::notify::Notification;
use mqtt_console_lib::notify::NotificationLevel;
use mqtt_console_lib::notify::NotificationSink;
use mqtt_console_lib::page::PageData;
use mqtt_console_lib::page::PageLink;
use mqtt_console_lib::page::TimePageLink;
use mqtt_console_lib::table::ActionDescriptor;
use mqtt_console_lib::table::ActionOutcome;
use mqtt_console_lib::table::ColumnDescriptor;
use mqtt_console_lib::table::EntityTableBuilder;
use mqtt_console_lib::table::EntityTableConfig;
use mqtt_console_lib::table::LoadOutcome;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Topic {
    name: String,
    partitions: u32,
}

fn topic(name: &str) -> Topic {
    Topic {
        name: name.to_string(),
        partitions: 1,
    }
}

type Dataset = Arc<Mutex<Vec<Topic>>>;

/// A table over a mutable dataset, paged the way the broker pages.
fn table_over(dataset: Dataset) -> EntityTableBuilder<Topic> {
    EntityTableConfig::builder(FnFetcher::new(move |link: TimePageLink| {
        let rows = dataset.lock().unwrap().clone();
        async move {
            let size = link.link.page_size.max(1) as usize;
            let start = link.link.page as usize * size;
            let total = rows.len();
            let data: Vec<Topic> = rows.into_iter().skip(start).take(size).collect();
            let has_next = start + size < total;
            Ok::<_, Error>(PageData::new(
                data,
                total.div_ceil(size) as u32,
                total as u64,
                has_next,
            ))
        }
    }))
    .title("kafka.topics")
    .entity_translations("kafka.no-kafka-topic-text", "kafka.topics-search")
    .column(ColumnDescriptor::new("name", "kafka.name", "70%"))
    .column(ColumnDescriptor::new("partitions", "kafka.partitions", "30%"))
}

fn dataset(count: usize) -> Dataset {
    Arc::new(Mutex::new(
        (0..count).map(|i| topic(&format!("topic-{i}"))).collect(),
    ))
}

#[derive(Default)]
struct Collect(Mutex<Vec<Notification>>);

impl NotificationSink for Collect {
    fn notify(&self, notification: Notification) {
        self.0.lock().unwrap().push(notification);
    }
}

// =============================================================================
// Paging
// =============================================================================

#[tokio::test]
async fn test_fetch_page_never_exceeds_page_size() {
    // Ignores the requested size, like a misbehaving server.
    let table = EntityTableConfig::builder(FnFetcher::new(|_link: TimePageLink| async {
        let rows: Vec<u32> = (0..25).collect();
        Ok::<_, Error>(PageData::new(rows, 1, 25, true))
    }))
    .build();

    for size in [1, 5, 10, 24, 25] {
        let page = table.fetch_page(&PageLink::new(size).into()).await.unwrap();
        assert_eq!(page.len(), size as usize);
    }
    let page = table.fetch_page(&PageLink::new(30).into()).await.unwrap();
    assert_eq!(page.len(), 25);
    assert!(!page.has_next());

    let unbounded = table.fetch_page(&PageLink::new(0).into()).await.unwrap();
    assert_eq!(unbounded.len(), 25);
}

#[tokio::test]
async fn test_paging_through_dataset() {
    let table = table_over(dataset(12)).default_page_size(5).build();
    assert!(table.reload().await.is_applied());
    assert_eq!(table.page().len(), 5);
    assert!(table.page().has_next());

    let next = table.default_page_link().next_page_link().next_page_link();
    assert!(table.load(next).await.is_applied());
    let page = table.page();
    assert_eq!(page.len(), 2);
    assert!(!page.has_next());
    assert_eq!(page.total_elements(), 12);

    let view = table.render();
    assert_eq!(view.page, 2);
    assert_eq!(view.total_pages, 3);
}

#[tokio::test]
async fn test_reload_reflects_mutation() {
    let data = dataset(3);
    let table = table_over(data.clone()).build();
    table.reload().await;
    assert_eq!(table.page().len(), 3);

    data.lock().unwrap().push(topic("orders"));
    table.reload().await;
    let page = table.page();
    assert_eq!(page.len(), 4);
    assert_eq!(page.data()[3].name, "orders");

    data.lock().unwrap().clear();
    table.reload().await;
    assert!(table.page().is_empty());
}

#[tokio::test]
async fn test_fetch_error_shows_empty_page() {
    let table = EntityTableConfig::builder(FnFetcher::new(|_link: TimePageLink| async {
        Err::<PageData<Topic>, _>(Error::Api(mqtt_console_lib::error::ApiError::http(
            503,
            "Service Unavailable",
        )))
    }))
    .entity_translations("kafka.no-kafka-topic-text", "kafka.topics-search")
    .build();

    let outcome = table.reload().await;
    assert!(matches!(outcome, LoadOutcome::Failed(TableError::FetchFailed(_))));
    let view = table.render();
    assert!(view.rows.is_empty());
    assert!(view.error.is_some());
    assert_eq!(view.empty_message.as_deref(), Some("kafka.no-kafka-topic-text"));
}

// =============================================================================
// Ordering and cancellation
// =============================================================================

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let (started_tx, started_rx) = oneshot::channel::<()>();
    let (release_tx, release_rx) = oneshot::channel::<()>();
    let gates = Arc::new(Mutex::new(Some((started_tx, release_rx))));

    // Page 0 blocks until released; every other page answers at once.
    let table = EntityTableConfig::builder(FnFetcher::new(move |link: TimePageLink| {
        let gate = if link.link.page == 0 {
            gates.lock().unwrap().take()
        } else {
            None
        };
        async move {
            if let Some((started, release)) = gate {
                let _ = started.send(());
                let _ = release.await;
            }
            Ok::<_, Error>(PageData::new(vec![link.link.page], 2, 2, false))
        }
    }))
    .build();
    let table = &table;

    let first = table.load(PageLink::new(1));
    let second = async move {
        let _ = started_rx.await;
        let outcome = table.load(PageLink::new(1).with_page(1)).await;
        let _ = release_tx.send(());
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert!(matches!(first, LoadOutcome::Stale));
    assert!(matches!(second, LoadOutcome::Applied));
    assert_eq!(table.page().data(), [1]);
    assert_eq!(table.page_link().map(|link| link.link.page), Some(1));
}

#[tokio::test]
async fn test_render_during_load_shows_displayed_page() {
    let (started_tx, started_rx) = oneshot::channel::<()>();
    let (release_tx, release_rx) = oneshot::channel::<()>();
    let gates = Arc::new(Mutex::new(Some((started_tx, release_rx))));

    // Page 1 blocks until released.
    let table = EntityTableConfig::builder(FnFetcher::new(move |link: TimePageLink| {
        let gate = if link.link.page == 1 {
            gates.lock().unwrap().take()
        } else {
            None
        };
        async move {
            if let Some((started, release)) = gate {
                let _ = started.send(());
                let _ = release.await;
            }
            Ok::<_, Error>(PageData::new(vec![link.link.page], 2, 2, link.link.page == 0))
        }
    }))
    .column(ColumnDescriptor::new("value", "value", "100%").value(|n: &u32| n.to_string().into()))
    .build();
    let table = &table;

    assert!(table.load(PageLink::new(1)).await.is_applied());

    let next = table.load(PageLink::new(1).with_page(1));
    let observe = async move {
        let _ = started_rx.await;
        let view = table.render();
        assert_eq!(table.page_link().map(|link| link.link.page), Some(0));
        let _ = release_tx.send(());
        view
    };
    let (outcome, view) = tokio::join!(next, observe);

    assert_eq!(view.page, 0);
    assert_eq!(view.rows[0].cells[0].text, "0");
    assert!(view.has_next);

    assert!(outcome.is_applied());
    let view = table.render();
    assert_eq!(view.page, 1);
    assert_eq!(view.rows[0].cells[0].text, "1");
    assert!(!view.has_next);
}

#[tokio::test]
async fn test_dispose_cancels_pending_load() {
    let (_hold, pending) = oneshot::channel::<()>();
    let pending = Arc::new(tokio::sync::Mutex::new(Some(pending)));

    let table = EntityTableConfig::builder(FnFetcher::new(move |_link: TimePageLink| {
        let pending = pending.clone();
        async move {
            if let Some(rx) = pending.lock().await.take() {
                let _ = rx.await;
            }
            Ok::<_, Error>(PageData::new(vec![1u32], 1, 1, false))
        }
    }))
    .build();
    let table = &table;

    let load = table.reload();
    let dispose = async move {
        tokio::task::yield_now().await;
        table.dispose();
    };
    let (outcome, ()) = tokio::join!(load, dispose);

    assert!(matches!(outcome, LoadOutcome::Cancelled));
    assert!(table.page().is_empty());
    assert!(table.error().is_none());
}

// =============================================================================
// Rendering and actions
// =============================================================================

#[tokio::test]
async fn test_empty_dataset_renders_no_entities_message() {
    let table = table_over(dataset(0)).build();
    table.reload().await;
    let view = table.render();
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_message.as_deref(), Some("kafka.no-kafka-topic-text"));
    assert_eq!(view.headers.len(), 2);
}

#[tokio::test]
async fn test_is_enabled_reevaluated_on_render() {
    let writable = Arc::new(AtomicBool::new(true));
    let flag = writable.clone();
    let table = table_over(dataset(2))
        .row_action(
            ActionDescriptor::new("retained-message.delete", "delete", |_topic: Topic| async {
                Ok(ActionOutcome::None)
            })
            .enabled_when(move |_topic| flag.load(Ordering::SeqCst)),
        )
        .build();
    table.reload().await;

    assert_eq!(table.render().rows[0].actions.len(), 1);

    writable.store(false, Ordering::SeqCst);
    assert!(table.render().rows[0].actions.is_empty());
    assert!(matches!(
        table.run_row_action("retained-message.delete", 0).await,
        Err(TableError::ActionUnavailable(_))
    ));

    writable.store(true, Ordering::SeqCst);
    assert_eq!(table.render().rows[1].actions[0].name, "retained-message.delete");
}

#[tokio::test]
async fn test_failed_action_notifies_and_keeps_state() {
    let sink = Arc::new(Collect::default());
    let table = table_over(dataset(3))
        .row_action(ActionDescriptor::new(
            "retained-message.delete",
            "delete",
            |_topic: Topic| async { Err(ActionError::message("topic is protected")) },
        ))
        .notifier(sink.clone())
        .build();
    table.reload().await;
    let before = table.page();

    let result = table.run_row_action("retained-message.delete", 1).await;
    assert!(matches!(result, Err(TableError::ActionFailed(_))));
    assert_eq!(table.page(), before);
    assert!(table.error().is_none());

    let notifications = sink.0.lock().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert_eq!(notifications[0].message, "topic is protected");
}

#[tokio::test]
async fn test_action_reload_shows_server_state() {
    let data = dataset(3);
    let remote = data.clone();
    let table = table_over(data)
        .row_action(ActionDescriptor::new(
            "retained-message.delete",
            "delete",
            move |topic: Topic| {
                let remote = remote.clone();
                async move {
                    remote.lock().unwrap().retain(|t| t.name != topic.name);
                    Ok(ActionOutcome::Reload)
                }
            },
        ))
        .build();
    table.reload().await;

    let outcome = table.run_row_action("retained-message.delete", 0).await.unwrap();
    assert_eq!(outcome, ActionOutcome::Reload);
    let names: Vec<_> = table.page().data().iter().map(|t| t.name.clone()).collect();
    assert_eq!(names, ["topic-1", "topic-2"]);
}

#[tokio::test]
async fn test_header_action_sees_selection() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = seen.clone();
    let table = table_over(dataset(4))
        .selection_enabled(true)
        .header_action(
            ActionDescriptor::new("delete-selected", "delete", move |context: mqtt_console_lib::table::HeaderContext| {
                record.lock().unwrap().extend(context.selected);
                async { Ok(ActionOutcome::None) }
            })
            .enabled_when(|context| !context.selected.is_empty()),
        )
        .build();
    table.reload().await;

    assert!(table.render().header_actions.is_empty());
    table.handle_row_click(0).await.unwrap();
    table.handle_row_click(3).await.unwrap();
    assert!(table.render().rows[3].selected);
    assert_eq!(table.render().header_actions.len(), 1);

    table.run_header_action("delete-selected").await.unwrap();
    assert_eq!(*seen.lock().unwrap(), [0, 3]);
}
