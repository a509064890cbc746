//! Main BrokerClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;

/// Header the broker reads the JWT from.
const AUTH_HEADER: &str = "X-Authorization";

/// The client for the broker's REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks and table configurations.
///
/// # Example
///
/// ```ignore
/// use mqtt_console_lib::{BrokerClient, auth::StaticTokenProvider};
///
/// let client = BrokerClient::builder()
///     .url("http://localhost:8083")
///     .token_provider(StaticTokenProvider::new("eyJhbGciOi..."))
///     .build()?;
///
/// let info = client.connect().await?;
/// println!("broker {}", info.version);
/// ```
#[derive(Clone)]
pub struct BrokerClient {
    inner: Arc<BrokerClientInner>,
}

struct BrokerClientInner {
    base_url: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl BrokerClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> BrokerClientBuilder<Missing, Missing> {
        BrokerClientBuilder::new()
    }

    /// Validates connectivity and credentials by reading the system info.
    pub async fn connect(&self) -> Result<crate::model::SystemVersionInfo, Error> {
        self.system_info().await
    }

    /// Returns the base URL of the broker.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Builds the full URL for an API path and query.
    pub(crate) fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.inner.base_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Sends an authenticated request and maps non-2xx answers to [`ApiError::Http`].
    pub(crate) async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.endpoint(path, query)?;
        let token = self
            .inner
            .token_provider
            .get_token(&self.inner.base_url)
            .await?;

        log::debug!("{} {}", method, url);

        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .header(AUTH_HEADER, token.as_bearer());

        if let Some(body) = body {
            request = request.json(body);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.inner.timeout.unwrap_or_default())
            } else {
                ApiError::from(e)
            }
        })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            log::warn!("{} answered HTTP {}", path, status);
            Err(Error::Api(ApiError::from_body(status, &body)))
        }
    }

    /// GETs a JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let response = self
            .request::<()>(Method::GET, path, query, None)
            .await?;
        let body = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), body)))
    }

    /// Sends a request whose response body is ignored.
    pub(crate) async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<(), Error> {
        self.request(method, path, query, body).await?;
        Ok(())
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`BrokerClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The broker's HTTP base URL
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct BrokerClientBuilder<U, P> {
    url: U,
    token_provider: P,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl BrokerClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for BrokerClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> BrokerClientBuilder<Missing, P> {
    /// Sets the broker base URL, e.g. `http://localhost:8083`.
    pub fn url(self, url: impl Into<String>) -> BrokerClientBuilder<Set<String>, P> {
        BrokerClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> BrokerClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> BrokerClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        BrokerClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> BrokerClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl BrokerClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`BrokerClient`].
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn build(self) -> Result<BrokerClient, ApiError> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(BrokerClient {
            inner: Arc::new(BrokerClientInner {
                base_url: self.url.0,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
