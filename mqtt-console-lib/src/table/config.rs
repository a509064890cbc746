//! The paged table controller.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::action::ActionDescriptor;
use super::action::ActionHandler;
use super::action::ActionOutcome;
use super::action::HeaderContext;
use super::action::boxed_handler;
use super::column::ColumnDescriptor;
use crate::error::ActionError;
use crate::error::TableError;
use crate::fetcher::ResourceFetcher;
use crate::i18n::KeyTranslator;
use crate::i18n::Translator;
use crate::notify::LogSink;
use crate::notify::Notification;
use crate::notify::NotificationSink;
use crate::page::PageData;
use crate::page::PageLink;
use crate::page::TimePageLink;

const DEFAULT_PAGE_SIZE: u32 = 10;

/// Feature switches of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFlags {
    pub search_enabled: bool,
    pub add_enabled: bool,
    pub entities_delete_enabled: bool,
    pub selection_enabled: bool,
    pub details_panel_enabled: bool,
    /// Fetch the first page as soon as the table is initialised.
    pub load_data_on_init: bool,
}

impl Default for TableFlags {
    fn default() -> Self {
        Self {
            search_enabled: true,
            add_enabled: false,
            entities_delete_enabled: false,
            selection_enabled: false,
            details_panel_enabled: false,
            load_data_on_init: true,
        }
    }
}

/// Translation keys for table-level messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityTranslations {
    /// Shown when the current page has no rows.
    pub no_entities: String,
    /// Placeholder of the search field.
    pub search: String,
}

/// Result of [`EntityTableConfig::load`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// The page was fetched and is now displayed.
    Applied,
    /// A newer load was issued while this one was in flight; its result was
    /// discarded.
    Stale,
    /// The fetch failed. The table now shows an empty page with the error set.
    Failed(TableError),
    /// The table was disposed before the fetch finished.
    Cancelled,
}

impl LoadOutcome {
    /// Returns `true` if the fetched page is now displayed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of [`EntityTableConfig::handle_row_click`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClick {
    /// The row-click handler ran.
    Handled(ActionOutcome),
    /// No handler is configured; the row's selection was toggled. Carries the
    /// new selection state of the row.
    Selected(bool),
    /// No handler and selection is disabled.
    Ignored,
}

pub(super) struct TableState<T> {
    pub(super) page: PageData<T>,
    /// Link of the displayed page.
    pub(super) link: Option<TimePageLink>,
    /// Link of the most recently issued load.
    pub(super) pending: Option<TimePageLink>,
    pub(super) error: Option<String>,
    pub(super) selection: BTreeSet<usize>,
}

impl<T> TableState<T> {
    pub(super) fn header_context(&self) -> HeaderContext {
        HeaderContext {
            selected: self.selection.iter().copied().collect(),
            page_len: self.page.len(),
            total_elements: self.page.total_elements(),
        }
    }
}

impl<T> Default for TableState<T> {
    fn default() -> Self {
        Self {
            page: PageData::empty(),
            link: None,
            pending: None,
            error: None,
            selection: BTreeSet::new(),
        }
    }
}

/// Mediates between a table-rendering surface and a [`ResourceFetcher`].
///
/// A config is built once per view activation and holds no persisted state.
/// All operations take `&self`, so a config can be shared behind an `Arc`
/// and driven from several tasks: loads race freely and only the most
/// recently issued one is applied.
///
/// # Example
///
/// ```ignore
/// let table = EntityTableConfig::builder(ApiFetcher::<KafkaTopic>::new(client, KAFKA_TOPICS_PATH))
///     .title("kafka.topics")
///     .column(ColumnDescriptor::new("name", "kafka.name", "70%"))
///     .column(ColumnDescriptor::new("size", "kafka.size", "10%")
///         .value(|topic| format_bytes(topic.size).into()))
///     .default_page_size(5)
///     .build();
///
/// table.init().await;
/// let view = table.render();
/// ```
pub struct EntityTableConfig<T> {
    pub(super) title: String,
    pub(super) columns: Vec<ColumnDescriptor<T>>,
    pub(super) row_actions: Vec<ActionDescriptor<T>>,
    pub(super) header_actions: Vec<ActionDescriptor<HeaderContext>>,
    pub(super) flags: TableFlags,
    pub(super) default_page_size: u32,
    pub(super) translations: EntityTranslations,
    pub(super) translator: Arc<dyn Translator>,
    fetcher: Arc<dyn ResourceFetcher<T>>,
    row_click: Option<ActionHandler<T>>,
    notifier: Arc<dyn NotificationSink>,
    state: Mutex<TableState<T>>,
    sequence: AtomicU64,
    cancel: CancellationToken,
}

impl<T> EntityTableConfig<T>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    /// Starts building a table over `fetcher`.
    pub fn builder(fetcher: impl ResourceFetcher<T> + 'static) -> EntityTableBuilder<T> {
        EntityTableBuilder::new(Arc::new(fetcher))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Columns in render order.
    pub fn columns(&self) -> &[ColumnDescriptor<T>] {
        &self.columns
    }

    pub fn row_actions(&self) -> &[ActionDescriptor<T>] {
        &self.row_actions
    }

    pub fn header_actions(&self) -> &[ActionDescriptor<HeaderContext>] {
        &self.header_actions
    }

    pub fn flags(&self) -> TableFlags {
        self.flags
    }

    pub fn entity_translations(&self) -> &EntityTranslations {
        &self.translations
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// The link of the first page: `default_page_size` rows, page 0.
    pub fn default_page_link(&self) -> PageLink {
        PageLink::new(self.default_page_size)
    }

    /// Fetches one page without touching the displayed state.
    ///
    /// The result never holds more than `page_size` rows, and a page shorter
    /// than `page_size` reports no next page.
    pub async fn fetch_page(&self, link: &TimePageLink) -> Result<PageData<T>, TableError> {
        let page = self
            .fetcher
            .fetch(link)
            .await
            .map_err(TableError::FetchFailed)?;
        Ok(page.normalize(link.link.page_size))
    }

    /// Loads the first page if the table is configured to load on init.
    pub async fn init(&self) -> Option<LoadOutcome> {
        if !self.flags.load_data_on_init {
            return None;
        }
        Some(self.load(self.default_page_link()).await)
    }

    /// Fetches `link` and displays the result, unless a newer load was issued
    /// in the meantime or the table was disposed.
    ///
    /// A failed fetch leaves an empty page with the error set.
    pub async fn load(&self, link: impl Into<TimePageLink>) -> LoadOutcome {
        let link = link.into();
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.lock().pending = Some(link.clone());

        if self.cancel.is_cancelled() {
            return LoadOutcome::Cancelled;
        }
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                log::debug!("load #{ticket} of '{}' cancelled", self.title);
                return LoadOutcome::Cancelled;
            }
            result = self.fetch_page(&link) => result,
        };

        let mut state = self.lock();
        if self.sequence.load(Ordering::SeqCst) != ticket {
            log::debug!("discarding stale page #{ticket} of '{}'", self.title);
            return LoadOutcome::Stale;
        }
        state.selection.clear();
        match result {
            Ok(page) => {
                state.page = page;
                state.link = Some(link);
                state.error = None;
                LoadOutcome::Applied
            }
            Err(err) => {
                log::warn!("failed to load '{}': {err}", self.title);
                state.page = PageData::empty();
                state.link = Some(link);
                state.error = Some(err.to_string());
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Loads the last used link again, or the default link if nothing was
    /// loaded yet.
    pub async fn reload(&self) -> LoadOutcome {
        let link = self.lock().pending.clone();
        let link = link.unwrap_or_else(|| self.default_page_link().into());
        self.load(link).await
    }

    /// The displayed page.
    pub fn page(&self) -> PageData<T> {
        self.lock().page.clone()
    }

    /// The link of the displayed page.
    pub fn page_link(&self) -> Option<TimePageLink> {
        self.lock().link.clone()
    }

    /// The error of the last applied load, if it failed.
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Selected row indices on the current page.
    pub fn selection(&self) -> Vec<usize> {
        self.lock().selection.iter().copied().collect()
    }

    /// Runs the row-click handler for row `index`, or toggles its selection
    /// when no handler is configured.
    pub async fn handle_row_click(&self, index: usize) -> Result<RowClick, TableError> {
        let row = self.row(index)?;
        if let Some(handler) = self.row_click.clone() {
            let outcome = self.finish_action(handler(row).await).await?;
            return Ok(RowClick::Handled(outcome));
        }
        if !self.flags.selection_enabled {
            return Ok(RowClick::Ignored);
        }
        let mut state = self.lock();
        let selected = if state.selection.remove(&index) {
            false
        } else {
            state.selection.insert(index)
        };
        Ok(RowClick::Selected(selected))
    }

    /// Runs the row action `name` on row `index`.
    pub async fn run_row_action(&self, name: &str, index: usize) -> Result<ActionOutcome, TableError> {
        let row = self.row(index)?;
        let action = self
            .row_actions
            .iter()
            .find(|action| action.name == name && action.is_enabled(&row))
            .ok_or_else(|| TableError::ActionUnavailable(name.to_string()))?;
        let future = action.invoke(row);
        self.finish_action(future.await).await
    }

    /// Runs the header action `name`.
    pub async fn run_header_action(&self, name: &str) -> Result<ActionOutcome, TableError> {
        let context = self.header_context();
        let action = self
            .header_actions
            .iter()
            .find(|action| action.name == name && action.is_enabled(&context))
            .ok_or_else(|| TableError::ActionUnavailable(name.to_string()))?;
        let future = action.invoke(context);
        self.finish_action(future.await).await
    }

    /// Selection and page summary handed to header actions.
    pub fn header_context(&self) -> HeaderContext {
        self.lock().header_context()
    }

    /// Cancels pending loads. Loads issued afterwards resolve to
    /// [`LoadOutcome::Cancelled`].
    pub fn dispose(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once the table was disposed.
    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A token cancelled when the table is disposed or dropped, for work an
    /// action spawns beyond its own future.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    async fn finish_action(
        &self,
        result: Result<ActionOutcome, ActionError>,
    ) -> Result<ActionOutcome, TableError> {
        match result {
            Ok(ActionOutcome::Reload) => {
                self.reload().await;
                Ok(ActionOutcome::Reload)
            }
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                log::warn!("action on '{}' failed: {err}", self.title);
                self.notifier.notify(Notification::error(err.to_string()));
                Err(TableError::ActionFailed(err))
            }
        }
    }

    fn row(&self, index: usize) -> Result<T, TableError> {
        self.lock()
            .page
            .data()
            .get(index)
            .cloned()
            .ok_or(TableError::RowOutOfRange(index))
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, TableState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Drop for EntityTableConfig<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Builder for [`EntityTableConfig`].
pub struct EntityTableBuilder<T> {
    title: String,
    columns: Vec<ColumnDescriptor<T>>,
    row_actions: Vec<ActionDescriptor<T>>,
    header_actions: Vec<ActionDescriptor<HeaderContext>>,
    flags: TableFlags,
    default_page_size: u32,
    translations: EntityTranslations,
    fetcher: Arc<dyn ResourceFetcher<T>>,
    row_click: Option<ActionHandler<T>>,
    translator: Arc<dyn Translator>,
    notifier: Arc<dyn NotificationSink>,
}

impl<T> EntityTableBuilder<T>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    fn new(fetcher: Arc<dyn ResourceFetcher<T>>) -> Self {
        Self {
            title: String::new(),
            columns: Vec::new(),
            row_actions: Vec::new(),
            header_actions: Vec::new(),
            flags: TableFlags::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
            translations: EntityTranslations::default(),
            fetcher,
            row_click: None,
            translator: Arc::new(KeyTranslator),
            notifier: Arc::new(LogSink),
        }
    }

    /// Set the table title (translation key).
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Append a column.
    pub fn column(mut self, column: ColumnDescriptor<T>) -> Self {
        self.columns.push(column);
        self
    }

    /// Append a row action.
    pub fn row_action(mut self, action: ActionDescriptor<T>) -> Self {
        self.row_actions.push(action);
        self
    }

    /// Append a header action.
    pub fn header_action(mut self, action: ActionDescriptor<HeaderContext>) -> Self {
        self.header_actions.push(action);
        self
    }

    pub fn flags(mut self, flags: TableFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn search_enabled(mut self, enabled: bool) -> Self {
        self.flags.search_enabled = enabled;
        self
    }

    pub fn add_enabled(mut self, enabled: bool) -> Self {
        self.flags.add_enabled = enabled;
        self
    }

    pub fn entities_delete_enabled(mut self, enabled: bool) -> Self {
        self.flags.entities_delete_enabled = enabled;
        self
    }

    pub fn selection_enabled(mut self, enabled: bool) -> Self {
        self.flags.selection_enabled = enabled;
        self
    }

    pub fn details_panel_enabled(mut self, enabled: bool) -> Self {
        self.flags.details_panel_enabled = enabled;
        self
    }

    pub fn load_data_on_init(mut self, enabled: bool) -> Self {
        self.flags.load_data_on_init = enabled;
        self
    }

    /// Set the page size of the first page. Defaults to 10.
    pub fn default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Set the empty-state and search-placeholder translation keys.
    pub fn entity_translations(
        mut self,
        no_entities: impl Into<String>,
        search: impl Into<String>,
    ) -> Self {
        self.translations = EntityTranslations {
            no_entities: no_entities.into(),
            search: search.into(),
        };
        self
    }

    /// Run `handler` when a row is clicked.
    pub fn on_row_click<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ActionOutcome, ActionError>> + Send + 'static,
    {
        self.row_click = Some(boxed_handler(handler));
        self
    }

    /// Set the translator used when rendering. Defaults to [`KeyTranslator`].
    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Set the sink action failures are reported to. Defaults to [`LogSink`].
    pub fn notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn build(self) -> EntityTableConfig<T> {
        EntityTableConfig {
            title: self.title,
            columns: self.columns,
            row_actions: self.row_actions,
            header_actions: self.header_actions,
            flags: self.flags,
            default_page_size: self.default_page_size,
            translations: self.translations,
            translator: self.translator,
            fetcher: self.fetcher,
            row_click: self.row_click,
            notifier: self.notifier,
            state: Mutex::new(TableState::default()),
            sequence: AtomicU64::new(0),
            cancel: CancellationToken::new(),
        }
    }
}
