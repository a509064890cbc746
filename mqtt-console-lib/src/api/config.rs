//! Broker configuration and system info

use crate::BrokerClient;
use crate::error::Error;
use crate::model::BrokerConfig;
use crate::model::SystemVersionInfo;

impl BrokerClient {
    /// Reads the broker configuration.
    pub async fn broker_config(&self) -> Result<BrokerConfig, Error> {
        self.get_json("/api/app/config", &[]).await
    }

    /// Lists the service ids of the broker nodes in the cluster.
    pub async fn broker_service_ids(&self) -> Result<Vec<String>, Error> {
        self.get_json("/api/app/brokers", &[]).await
    }

    /// Reads the broker version and build info.
    pub async fn system_info(&self) -> Result<SystemVersionInfo, Error> {
        self.get_json("/api/system/info", &[]).await
    }
}
