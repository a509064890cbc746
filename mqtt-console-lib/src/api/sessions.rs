//! Client session operations

use reqwest::Method;
use uuid::Uuid;

use crate::BrokerClient;
use crate::error::Error;
use crate::model::DetailedClientSessionInfo;
use crate::model::ShortClientSessionInfo;
use crate::page::PageData;
use crate::page::TimePageLink;

/// Collection path for client sessions.
pub const SESSIONS_PATH: &str = "/api/v1/client-session";

impl BrokerClient {
    /// Lists client sessions.
    pub async fn client_sessions(
        &self,
        link: &TimePageLink,
    ) -> Result<PageData<ShortClientSessionInfo>, Error> {
        self.get_json(SESSIONS_PATH, &link.query_pairs()).await
    }

    /// Reads the full session of one client.
    pub async fn client_session_details(
        &self,
        client_id: &str,
    ) -> Result<DetailedClientSessionInfo, Error> {
        self.get_json(
            &format!("{SESSIONS_PATH}/details"),
            &[("clientId", client_id.to_string())],
        )
        .await
    }

    /// Forces a connected client off the broker.
    pub async fn disconnect_client_session(
        &self,
        client_id: &str,
        session_id: Option<Uuid>,
    ) -> Result<(), Error> {
        self.send::<()>(
            Method::POST,
            &format!("{SESSIONS_PATH}/disconnect"),
            &session_query(client_id, session_id),
            None,
        )
        .await
    }

    /// Deletes the stored state of a disconnected client.
    pub async fn remove_client_session(
        &self,
        client_id: &str,
        session_id: Option<Uuid>,
    ) -> Result<(), Error> {
        self.send::<()>(
            Method::DELETE,
            &format!("{SESSIONS_PATH}/remove"),
            &session_query(client_id, session_id),
            None,
        )
        .await
    }
}

fn session_query(client_id: &str, session_id: Option<Uuid>) -> Vec<(&'static str, String)> {
    let mut query = vec![("clientId", client_id.to_string())];
    if let Some(id) = session_id {
        query.push(("sessionId", id.to_string()));
    }
    query
}
