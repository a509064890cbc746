//! Surface-independent snapshot of a table.

use serde::Serialize;

use super::column::Alignment;
use super::column::CellStyle;
use super::column::CellValue;
use super::column::ColumnWidth;
use super::config::EntityTableConfig;
use crate::i18n::Translator;

/// Everything a rendering surface needs to draw the current page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedTable {
    /// Translated table title.
    pub title: String,
    pub headers: Vec<RenderedHeader>,
    pub rows: Vec<RenderedRow>,
    /// Enabled header actions.
    pub header_actions: Vec<RenderedAction>,
    /// Translated empty-state message, set only when the page has no rows.
    pub empty_message: Option<String>,
    /// Translated search placeholder, set only when search is enabled.
    pub search_placeholder: Option<String>,
    /// The error of the last load, if it failed.
    pub error: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHeader {
    pub key: String,
    pub title: String,
    pub width: ColumnWidth,
    pub align: Alignment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub text: String,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Row index on the current page, as passed to row actions.
    pub index: usize,
    pub cells: Vec<RenderedCell>,
    /// Row actions enabled for this row.
    pub actions: Vec<RenderedAction>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAction {
    /// Name to invoke the action by.
    pub name: String,
    /// Translated name.
    pub label: String,
    pub icon: String,
    pub is_mdi_icon: bool,
}

impl<T> EntityTableConfig<T>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    /// Snapshots the current page for display.
    ///
    /// Action predicates are evaluated now, so consecutive renders reflect
    /// state changes outside the table.
    pub fn render(&self) -> RenderedTable {
        let translator = self.translator.as_ref();
        let needs_json = self.columns.iter().any(|column| column.needs_json());
        let state = self.lock();
        let header_context = state.header_context();
        let page = &state.page;

        let rows = page
            .data()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let json = if needs_json {
                    serde_json::to_value(row)
                        .inspect_err(|err| log::warn!("row {index} is not serializable: {err}"))
                        .ok()
                } else {
                    None
                };
                let cells = self
                    .columns
                    .iter()
                    .map(|column| RenderedCell {
                        text: cell_text(column.cell(row, json.as_ref()), translator),
                        style: column.cell_style(row),
                    })
                    .collect();
                let actions = self
                    .row_actions
                    .iter()
                    .filter(|action| action.is_enabled(row))
                    .map(|action| RenderedAction {
                        name: action.name.clone(),
                        label: translator.translate(&action.name),
                        icon: action.icon.clone(),
                        is_mdi_icon: action.is_mdi_icon,
                    })
                    .collect();
                RenderedRow {
                    index,
                    cells,
                    actions,
                    selected: state.selection.contains(&index),
                }
            })
            .collect();

        RenderedTable {
            title: translator.translate(&self.title),
            headers: self
                .columns
                .iter()
                .map(|column| RenderedHeader {
                    key: column.key.clone(),
                    title: translator.translate(&column.title),
                    width: column.width,
                    align: column.align,
                })
                .collect(),
            rows,
            header_actions: self
                .header_actions
                .iter()
                .filter(|action| action.is_enabled(&header_context))
                .map(|action| RenderedAction {
                    name: action.name.clone(),
                    label: translator.translate(&action.name),
                    icon: action.icon.clone(),
                    is_mdi_icon: action.is_mdi_icon,
                })
                .collect(),
            empty_message: page
                .is_empty()
                .then(|| translator.translate(&self.translations.no_entities)),
            search_placeholder: self
                .flags
                .search_enabled
                .then(|| translator.translate(&self.translations.search)),
            error: state.error.clone(),
            page: state.link.as_ref().map_or(0, |link| link.link.page),
            page_size: state
                .link
                .as_ref()
                .map_or(self.default_page_size, |link| link.link.page_size),
            total_pages: page.total_pages(),
            total_elements: page.total_elements(),
            has_next: page.has_next(),
        }
    }
}

fn cell_text(value: CellValue, translator: &dyn Translator) -> String {
    match value {
        CellValue::Text(text) => text,
        CellValue::Key(key) => translator.translate(&key),
        CellValue::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;
    use crate::error::Error;
    use crate::fetcher::FnFetcher;
    use crate::i18n::Catalog;
    use crate::page::PageData;
    use crate::page::TimePageLink;
    use crate::table::ActionDescriptor;
    use crate::table::ActionOutcome;
    use crate::table::ColumnDescriptor;
    use crate::table::HeaderContext;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Topic {
        name: String,
        internal: bool,
    }

    fn topics(rows: Vec<Topic>) -> EntityTableConfig<Topic> {
        let mut catalog = Catalog::new();
        catalog.insert("kafka.name", "Name");
        catalog.insert("kafka.no-kafka-topic-text", "No Kafka topics found");
        catalog.insert("yes", "Yes");
        EntityTableConfig::builder(FnFetcher::new(move |_link: TimePageLink| {
            let rows = rows.clone();
            async move {
                let total = rows.len() as u64;
                Ok::<_, Error>(PageData::new(rows, 1, total, false))
            }
        }))
        .title("kafka.topics")
        .column(ColumnDescriptor::new("name", "kafka.name", "70%"))
        .column(
            ColumnDescriptor::new("internal", "kafka.internal", "30%").value(|topic: &Topic| {
                if topic.internal {
                    CellValue::key("yes")
                } else {
                    CellValue::Empty
                }
            }),
        )
        .row_action(
            ActionDescriptor::new("delete", "delete", |_topic: Topic| async {
                Ok(ActionOutcome::Reload)
            })
            .enabled_when(|topic| !topic.internal),
        )
        .entity_translations("kafka.no-kafka-topic-text", "kafka.topics-search")
        .translator(std::sync::Arc::new(catalog))
        .build()
    }

    fn topic(name: &str, internal: bool) -> Topic {
        Topic {
            name: name.into(),
            internal,
        }
    }

    #[tokio::test]
    async fn test_render_rows() {
        let table = topics(vec![topic("orders", false), topic("__offsets", true)]);
        table.reload().await;
        let view = table.render();

        assert_eq!(view.title, "kafka.topics");
        assert_eq!(view.headers[0].title, "Name");
        assert_eq!(view.headers[0].width, ColumnWidth::Percent(70));
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].cells[0].text, "orders");
        assert_eq!(view.rows[0].cells[1].text, "");
        assert_eq!(view.rows[1].cells[1].text, "Yes");
        assert_eq!(view.rows[0].actions.len(), 1);
        assert!(view.rows[1].actions.is_empty());
        assert_eq!(view.empty_message, None);
        assert_eq!(view.search_placeholder.as_deref(), Some("kafka.topics-search"));
        assert_eq!(view.page_size, 10);
    }

    #[tokio::test]
    async fn test_render_empty_state() {
        let table = topics(Vec::new());
        table.reload().await;
        let view = table.render();
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some("No Kafka topics found"));
    }

    #[test]
    fn test_render_before_first_load() {
        let view = topics(Vec::new()).render();
        assert!(view.rows.is_empty());
        assert_eq!(view.page, 0);
        assert!(view.error.is_none());
    }

    #[tokio::test]
    async fn test_header_actions_follow_rendered_page() {
        let table = EntityTableConfig::builder(FnFetcher::new(|_link: TimePageLink| async {
            Ok::<_, Error>(PageData::new(vec![topic("orders", false)], 1, 1, false))
        }))
        .column(ColumnDescriptor::new("name", "kafka.name", "100%"))
        .header_action(
            ActionDescriptor::new("export", "download", |_context: HeaderContext| async {
                Ok(ActionOutcome::None)
            })
            .enabled_when(|context| context.page_len > 0),
        )
        .build();

        let view = table.render();
        assert!(view.rows.is_empty());
        assert!(view.header_actions.is_empty());

        table.reload().await;
        let view = table.render();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.header_actions[0].name, "export");
    }
}
