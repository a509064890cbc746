//! Page type for paginated query results.

use serde::Deserialize;

/// One page of results plus pagination metadata.
///
/// Deserializes from the broker's `{data, totalPages, totalElements, hasNext}`
/// body.
///
/// # Example
///
/// ```ignore
/// let page: PageData<KafkaTopic> = client.kafka_topics(&link).await?;
///
/// for topic in page.data() {
///     println!("{} ({} partitions)", topic.name, topic.partitions);
/// }
///
/// if page.has_next() {
///     let page = client.kafka_topics(&link.next_page_link()).await?;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    data: Vec<T>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_elements: u64,
    #[serde(default)]
    has_next: bool,
}

impl<T> PageData<T> {
    /// Creates a page from its parts.
    pub fn new(data: Vec<T>, total_pages: u32, total_elements: u64, has_next: bool) -> Self {
        Self {
            data,
            total_pages,
            total_elements,
            has_next,
        }
    }

    /// A page with no rows and no further pages.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0, false)
    }

    /// Returns the rows on this page.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the page and returns its rows.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Total number of pages reported by the server.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Total number of elements across all pages.
    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Returns `true` if more pages exist beyond this one.
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of rows on this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Clamps the page to what was requested.
    ///
    /// Rows beyond `page_size` are dropped, and a page shorter than `page_size`
    /// is marked final. A `page_size` of 0 leaves the page as is.
    pub(crate) fn normalize(mut self, page_size: u32) -> Self {
        if page_size == 0 {
            return self;
        }
        let size = page_size as usize;
        if self.data.len() > size {
            log::warn!(
                "server returned {} rows for page size {}, truncating",
                self.data.len(),
                size
            );
            self.data.truncate(size);
        }
        if self.has_next && self.data.len() < size {
            log::debug!("short page with hasNext set, treating as final page");
            self.has_next = false;
        }
        self
    }

    /// Maps the rows using the provided function.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PageData<U> {
        PageData {
            data: self.data.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            has_next: self.has_next,
        }
    }
}

impl<T> Default for PageData<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_broker_body() {
        let page: PageData<String> = serde_json::from_str(
            r#"{"data":["a","b"],"totalPages":3,"totalElements":6,"hasNext":true}"#,
        )
        .unwrap();
        assert_eq!(page.data(), ["a", "b"]);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.total_elements(), 6);
        assert!(page.has_next());
    }

    #[test]
    fn test_missing_counters_default() {
        let page: PageData<u32> = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert_eq!(page, PageData::empty());
    }

    #[test]
    fn test_normalize_truncates_oversized_page() {
        let page = PageData::new(vec![1, 2, 3, 4], 1, 4, false).normalize(3);
        assert_eq!(page.data(), [1, 2, 3]);
    }

    #[test]
    fn test_normalize_short_page_is_final() {
        let page = PageData::new(vec![1, 2], 5, 42, true).normalize(10);
        assert!(!page.has_next());
        assert_eq!(page.total_elements(), 42);
    }

    #[test]
    fn test_normalize_full_page_keeps_has_next() {
        let page = PageData::new(vec![1, 2], 5, 42, true).normalize(2);
        assert!(page.has_next());
    }

    #[test]
    fn test_normalize_unbounded() {
        let page = PageData::new(vec![1, 2, 3], 1, 3, true).normalize(0);
        assert_eq!(page.len(), 3);
        assert!(page.has_next());
    }
}
