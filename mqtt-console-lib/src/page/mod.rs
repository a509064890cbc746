//! Page requests and page results.
//!
//! - [`PageLink`] - which page to fetch, with optional text search and sort
//! - [`TimePageLink`] - a [`PageLink`] restricted to a time window
//! - [`PageData`] - one page of results plus pagination metadata

mod data;
mod link;

pub use data::PageData;
pub use link::Direction;
pub use link::PageLink;
pub use link::SortOrder;
pub use link::TimePageLink;
