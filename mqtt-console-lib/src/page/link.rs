//! Page request descriptors.

use chrono::DateTime;
use chrono::Utc;

use crate::error::ValidationError;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// The value the broker API expects in `sortOrder`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Server-side ordering of a paged query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    /// Property to sort by, as named by the API.
    pub property: String,
    /// Sort direction.
    pub direction: Direction,
}

impl SortOrder {
    /// Creates an ascending order on a property.
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending order on a property.
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Request descriptor for one page of a paged resource.
///
/// A `page_size` of 0 leaves the page size to the server.
///
/// # Example
///
/// ```
/// use mqtt_console_lib::page::{PageLink, SortOrder};
///
/// let link = PageLink::new(10)
///     .with_text_search("sensor")
///     .with_sort(SortOrder::desc("createdTime"));
///
/// assert_eq!(link.next_page_link().page, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLink {
    /// Number of rows per page.
    pub page_size: u32,
    /// Zero-based page index.
    pub page: u32,
    /// Free-text filter matched by the server.
    pub text_search: Option<String>,
    /// Server-side ordering.
    pub sort_order: Option<SortOrder>,
}

impl PageLink {
    /// Creates a link to the first page with the given page size.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }

    /// Sets the page index.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the text filter. An empty string clears it.
    pub fn with_text_search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text_search = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    /// Sets the sort order.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort_order = Some(sort);
        self
    }

    /// Returns a link to the following page.
    pub fn next_page_link(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    /// Returns a link to the preceding page, staying on page 0.
    pub fn prev_page_link(&self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            ..self.clone()
        }
    }

    /// Query parameters for this link, in the order the broker API lists them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.page_size > 0 {
            pairs.push(("pageSize", self.page_size.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        if let Some(text) = &self.text_search {
            pairs.push(("textSearch", text.clone()));
        }
        if let Some(sort) = &self.sort_order {
            pairs.push(("sortProperty", sort.property.clone()));
            pairs.push(("sortOrder", sort.direction.as_str().to_string()));
        }
        pairs
    }
}

/// A [`PageLink`] restricted to a time window.
///
/// When both bounds are set, `start_time <= end_time` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimePageLink {
    /// The underlying page request.
    pub link: PageLink,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
}

impl TimePageLink {
    /// Creates an unbounded time link around a page link.
    pub fn new(link: PageLink) -> Self {
        Self {
            link,
            start_time: None,
            end_time: None,
        }
    }

    /// Sets both bounds of the time window.
    pub fn with_time_range(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        self.start_time = start;
        self.end_time = end;
        Ok(self)
    }

    /// Sets the start of the time window.
    pub fn with_start_time(self, start: DateTime<Utc>) -> Result<Self, ValidationError> {
        let end = self.end_time;
        self.with_time_range(Some(start), end)
    }

    /// Sets the end of the time window.
    pub fn with_end_time(self, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        let start = self.start_time;
        self.with_time_range(start, Some(end))
    }

    /// Returns the start of the time window, if bounded.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Returns the end of the time window, if bounded.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Returns the same window one page further.
    pub fn next_page_link(&self) -> Self {
        Self {
            link: self.link.next_page_link(),
            ..self.clone()
        }
    }

    /// Returns the same window one page back.
    pub fn prev_page_link(&self) -> Self {
        Self {
            link: self.link.prev_page_link(),
            ..self.clone()
        }
    }

    /// Query parameters, with time bounds as epoch milliseconds.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.link.query_pairs();
        if let Some(start) = self.start_time {
            pairs.push(("startTime", start.timestamp_millis().to_string()));
        }
        if let Some(end) = self.end_time {
            pairs.push(("endTime", end.timestamp_millis().to_string()));
        }
        pairs
    }
}

impl From<PageLink> for TimePageLink {
    fn from(link: PageLink) -> Self {
        Self::new(link)
    }
}
