//! Paged entity tables.
//!
//! An [`EntityTableConfig`] binds a [`ResourceFetcher`](crate::fetcher::ResourceFetcher)
//! to column and action descriptors and keeps the currently displayed page.
//! Rendering surfaces call [`EntityTableConfig::render`] and draw the
//! resulting [`RenderedTable`]; they never talk to the fetcher directly.

mod action;
mod column;
mod config;
mod render;

pub use action::ActionDescriptor;
pub use action::ActionFuture;
pub use action::ActionOutcome;
pub use action::HeaderContext;
pub use column::Alignment;
pub use column::CellStyle;
pub use column::CellValue;
pub use column::ColumnDescriptor;
pub use column::ColumnWidth;
pub use config::EntityTableBuilder;
pub use config::EntityTableConfig;
pub use config::EntityTranslations;
pub use config::LoadOutcome;
pub use config::RowClick;
pub use config::TableFlags;
pub use render::RenderedAction;
pub use render::RenderedCell;
pub use render::RenderedHeader;
pub use render::RenderedRow;
pub use render::RenderedTable;
