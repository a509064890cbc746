//! Broker configuration and version models

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Broker configuration as reported by `/api/app/config`.
///
/// The set of keys depends on the broker version, so it is kept as a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrokerConfig(pub BTreeMap<String, serde_json::Value>);

impl BrokerConfig {
    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.0.iter()
    }
}

/// Build information reported by `/api/system/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemVersionInfo {
    pub version: String,
    #[serde(default)]
    pub artifact: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub build_time: Option<String>,
}
