//! Client credentials operations

use reqwest::Method;
use uuid::Uuid;

use crate::BrokerClient;
use crate::error::Error;
use crate::model::ChangePasswordRequest;
use crate::model::ShortMqttClientCredentials;
use crate::page::PageData;
use crate::page::TimePageLink;

/// Collection path for client credentials.
pub const CREDENTIALS_PATH: &str = "/api/mqtt/client/credentials";

impl BrokerClient {
    /// Lists client credentials.
    pub async fn client_credentials(
        &self,
        link: &TimePageLink,
    ) -> Result<PageData<ShortMqttClientCredentials>, Error> {
        self.get_json(CREDENTIALS_PATH, &link.query_pairs()).await
    }

    /// Deletes one set of client credentials.
    pub async fn delete_client_credentials(&self, id: Uuid) -> Result<(), Error> {
        self.send::<()>(Method::DELETE, &format!("{CREDENTIALS_PATH}/{id}"), &[], None)
            .await
    }

    /// Changes the password of MQTT basic credentials.
    pub async fn change_client_password(
        &self,
        id: Uuid,
        request: &ChangePasswordRequest,
    ) -> Result<(), Error> {
        self.send(
            Method::POST,
            &format!("{CREDENTIALS_PATH}/{id}/password"),
            &[],
            Some(request),
        )
        .await
    }
}
