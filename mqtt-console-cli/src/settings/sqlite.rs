//! SQLite settings backend.

use std::fs;
use std::path::Path;

use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_trait::async_trait;
use dashmap::DashMap;

use super::SettingsBackend;
use super::SettingsError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL
)";

/// Settings stored in a SQLite file, read through a write-through cache.
pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Opens (or creates) the database at `path`, creating parent
    /// directories as needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let client = ClientBuilder::new().path(path).open().await?;
        client.conn(|conn| conn.execute(SCHEMA, [])).await?;
        log::debug!("settings database at {}", path.display());

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(hit) = self.cache.get(key) {
            return Ok(Some(hit.clone()));
        }

        let lookup = key.to_string();
        let stored: Option<Vec<u8>> = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
                let mut rows = stmt.query([&lookup])?;
                let value = rows.next()?.map(|row| row.get(0)).transpose()?;
                Ok(value)
            })
            .await?;

        if let Some(value) = &stored {
            self.cache.insert(key.to_string(), value.clone());
        }
        Ok(stored)
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let (row_key, row_value) = (key.to_string(), value.clone());
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO settings (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![row_key, row_value],
                )
            })
            .await?;
        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        let row_key = key.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM settings WHERE key = ?1", [row_key]))
            .await?;
        self.cache.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        // `_` and `%` in keys are literal.
        let pattern = format!(
            "{}%",
            prefix
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_")
        );
        let keys = self
            .client
            .conn(move |conn| {
                let mut stmt =
                    conn.prepare("SELECT key FROM settings WHERE key LIKE ?1 ESCAPE '\\'")?;
                let keys = stmt.query_map([pattern], |row| row.get(0))?;
                keys.collect::<Result<Vec<String>, _>>()
            })
            .await?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.db");

        let backend = SqliteBackend::open(&path).await.unwrap();
        backend.set_bytes("broker.url", vec![1, 2, 3]).await.unwrap();
        backend.set_bytes("broker.url", vec![4]).await.unwrap();
        drop(backend);

        let reopened = SqliteBackend::open(&path).await.unwrap();
        assert_eq!(reopened.get_bytes("broker.url").await.unwrap(), Some(vec![4]));
        assert_eq!(reopened.get_bytes("broker.token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_and_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let backend = SqliteBackend::open(dir.path().join("settings.db"))
            .await
            .unwrap();
        for key in ["broker.url", "broker.token", "brokerXurl", "table.page_size"] {
            backend.set_bytes(key, vec![0]).await.unwrap();
        }

        let mut keys = backend.keys_with_prefix("broker.").await.unwrap();
        keys.sort();
        assert_eq!(keys, ["broker.token", "broker.url"]);

        backend.delete("broker.token").await.unwrap();
        backend.delete("never.set").await.unwrap();
        assert_eq!(backend.get_bytes("broker.token").await.unwrap(), None);
        assert_eq!(backend.keys_with_prefix("table_").await.unwrap(), Vec::<String>::new());
    }
}
