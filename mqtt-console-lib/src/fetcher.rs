//! Paged read sources for tables.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::BrokerClient;
use crate::error::Error;
use crate::page::PageData;
use crate::page::TimePageLink;

/// An async read returning one page of a resource.
///
/// Implementations must be idempotent reads without side effects; the table
/// re-invokes `fetch` with the same link to retry or reload.
#[async_trait]
pub trait ResourceFetcher<T>: Send + Sync {
    /// Fetches the page described by `link`.
    async fn fetch(&self, link: &TimePageLink) -> Result<PageData<T>, Error>;
}

/// Fetches pages from one collection endpoint of the broker API.
///
/// # Example
///
/// ```ignore
/// use mqtt_console_lib::api::KAFKA_TOPICS_PATH;
/// use mqtt_console_lib::fetcher::ApiFetcher;
/// use mqtt_console_lib::model::KafkaTopic;
///
/// let topics = ApiFetcher::<KafkaTopic>::new(client.clone(), KAFKA_TOPICS_PATH);
/// ```
pub struct ApiFetcher<T> {
    client: BrokerClient,
    path: String,
    _row: PhantomData<fn() -> T>,
}

impl<T> ApiFetcher<T> {
    /// Creates a fetcher for the collection at `path`.
    pub fn new(client: BrokerClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _row: PhantomData,
        }
    }

    /// The collection path this fetcher reads.
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<T> ResourceFetcher<T> for ApiFetcher<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, link: &TimePageLink) -> Result<PageData<T>, Error> {
        self.client.get_json(&self.path, &link.query_pairs()).await
    }
}

/// Adapts an async closure into a [`ResourceFetcher`].
///
/// # Example
///
/// ```
/// use mqtt_console_lib::fetcher::FnFetcher;
/// use mqtt_console_lib::error::Error;
/// use mqtt_console_lib::page::{PageData, TimePageLink};
///
/// let fetcher = FnFetcher::new(|link: TimePageLink| async move {
///     let size = link.link.page_size;
///     let rows: Vec<u32> = (0..size).collect();
///     Ok::<_, Error>(PageData::new(rows, 1, u64::from(size), false))
/// });
/// ```
pub struct FnFetcher<F> {
    f: F,
}

impl<F> FnFetcher<F> {
    /// Wraps `f`, which is called with an owned copy of each link.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<T, F, Fut> ResourceFetcher<T> for FnFetcher<F>
where
    T: Send + 'static,
    F: Fn(TimePageLink) -> Fut + Send + Sync,
    Fut: Future<Output = Result<PageData<T>, Error>> + Send + 'static,
{
    async fn fetch(&self, link: &TimePageLink) -> Result<PageData<T>, Error> {
        (self.f)(link.clone()).await
    }
}
