//! Persisted console settings.
//!
//! Values are bincode-encoded and stored under dotted keys through a
//! [`SettingsBackend`].

mod backend;
mod memory;
mod sqlite;

pub use backend::SettingsBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use clap::ValueEnum;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("cannot create settings directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// The settings the console knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingKey {
    /// Base URL of the broker's HTTP API.
    #[value(name = "broker.url")]
    BrokerUrl,
    /// JWT sent with every request.
    #[value(name = "broker.token")]
    BrokerToken,
    /// Rows per page when `--page-size` is not given.
    #[value(name = "table.page_size")]
    TablePageSize,
}

impl SettingKey {
    pub const ALL: [SettingKey; 3] = [Self::BrokerUrl, Self::BrokerToken, Self::TablePageSize];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BrokerUrl => "broker.url",
            Self::BrokerToken => "broker.token",
            Self::TablePageSize => "table.page_size",
        }
    }
}

/// Typed access to a [`SettingsBackend`].
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Reads and decodes the value under `key`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        let Some(bytes) = self.backend.get_bytes(key).await? else {
            return Ok(None);
        };
        bincode::deserialize(&bytes)
            .map(Some)
            .map_err(SettingsError::Deserialization)
    }

    /// Encodes and stores `value` under `key`.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.set_bytes(key, bytes).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.delete(key).await
    }

    pub async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        self.backend.keys_with_prefix(prefix).await
    }

    /// Stores `raw` under `key`, parsed to the key's type.
    pub async fn set_raw(&self, key: SettingKey, raw: &str) -> Result<(), SettingsError> {
        match key {
            SettingKey::BrokerUrl | SettingKey::BrokerToken => {
                self.set(key.as_str(), &raw.to_string()).await
            }
            SettingKey::TablePageSize => {
                let size: u32 = raw.parse().map_err(|_| SettingsError::InvalidValue {
                    key: key.as_str(),
                    value: raw.to_string(),
                })?;
                self.set(key.as_str(), &size).await
            }
        }
    }

    /// Reads `key` back as display text. Tokens are shortened.
    pub async fn display(&self, key: SettingKey) -> Result<Option<String>, SettingsError> {
        Ok(match key {
            SettingKey::BrokerUrl => self.get::<String>(key.as_str()).await?,
            SettingKey::BrokerToken => self
                .get::<String>(key.as_str())
                .await?
                .map(|token| mask(&token)),
            SettingKey::TablePageSize => self
                .get::<u32>(key.as_str())
                .await?
                .map(|size| size.to_string()),
        })
    }

    pub async fn broker_url(&self) -> Result<Option<String>, SettingsError> {
        self.get(SettingKey::BrokerUrl.as_str()).await
    }

    pub async fn broker_token(&self) -> Result<Option<String>, SettingsError> {
        self.get(SettingKey::BrokerToken.as_str()).await
    }

    pub async fn page_size(&self) -> Result<Option<u32>, SettingsError> {
        self.get(SettingKey::TablePageSize.as_str()).await
    }
}

fn mask(token: &str) -> String {
    let visible: String = token.chars().take(8).collect();
    if visible.len() == token.len() {
        return "*".repeat(token.len());
    }
    format!("{visible}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SettingsProvider {
        SettingsProvider::new(MemoryBackend::new())
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let settings = provider();
        settings
            .set_raw(SettingKey::BrokerUrl, "http://broker:8083")
            .await
            .unwrap();
        settings.set_raw(SettingKey::TablePageSize, "25").await.unwrap();

        assert_eq!(
            settings.broker_url().await.unwrap().as_deref(),
            Some("http://broker:8083")
        );
        assert_eq!(settings.page_size().await.unwrap(), Some(25));
        assert_eq!(settings.broker_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_page_size_rejected() {
        let settings = provider();
        let err = settings
            .set_raw(SettingKey::TablePageSize, "lots")
            .await
            .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { key: "table.page_size", .. }));
        assert_eq!(settings.page_size().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_token_display_is_masked() {
        let settings = provider();
        settings
            .set_raw(SettingKey::BrokerToken, "eyJhbGciOiJIUzUxMiJ9.payload")
            .await
            .unwrap();
        assert_eq!(
            settings.display(SettingKey::BrokerToken).await.unwrap().as_deref(),
            Some("eyJhbGci…")
        );

        settings.delete(SettingKey::BrokerToken.as_str()).await.unwrap();
        assert_eq!(settings.display(SettingKey::BrokerToken).await.unwrap(), None);
    }

    #[test]
    fn test_keys_match_value_names() {
        for key in SettingKey::ALL {
            let value = key.to_possible_value().unwrap();
            assert_eq!(value.get_name(), key.as_str());
        }
    }
}
