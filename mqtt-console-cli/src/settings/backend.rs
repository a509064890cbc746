//! Storage seam under the settings provider.

use async_trait::async_trait;

use super::SettingsError;

/// Raw byte storage for settings.
///
/// [`SettingsProvider`](super::SettingsProvider) adds typed access on top.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), SettingsError>;

    /// Stored keys starting with `prefix`, in no particular order.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;
}
