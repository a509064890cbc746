//! Client sessions table.

use crate::api::SESSIONS_PATH;
use crate::fetcher::ApiFetcher;
use crate::model::ConnectionState;
use crate::model::ShortClientSessionInfo;
use crate::table::ActionDescriptor;
use crate::table::ActionOutcome;
use crate::table::CellStyle;
use crate::table::CellValue;
use crate::table::ColumnDescriptor;
use crate::table::EntityTableConfig;
use crate::table::HeaderContext;

use super::ConsoleContext;
use super::SESSIONS_HELP_URL;

pub const DISCONNECT_ACTION: &str = "mqtt-client-session.disconnect";
pub const REMOVE_ACTION: &str = "mqtt-client-session.remove";
pub const HELP_ACTION: &str = "help.goto-help-page";

/// Lists client sessions. Clicking a row opens the session details and
/// refreshes the page once they are closed.
pub fn sessions_table(ctx: &ConsoleContext) -> EntityTableConfig<ShortClientSessionInfo> {
    let details = ctx.clone();
    EntityTableConfig::builder(ApiFetcher::new(ctx.client.clone(), SESSIONS_PATH))
        .title("mqtt-client-session.type-sessions")
        .entity_translations("mqtt-client-session.no-session-text", "mqtt-client-session.search")
        .add_enabled(true)
        .column(ColumnDescriptor::new("clientId", "mqtt-client.client-id", "25%"))
        .column(
            ColumnDescriptor::new("connectionState", "mqtt-client-session.connect", "25%")
                .value(|session: &ShortClientSessionInfo| {
                    CellValue::key(session.connection_state.translation_key())
                })
                .style(|session| CellStyle::color(session.connection_state.color())),
        )
        .column(ColumnDescriptor::new("nodeId", "mqtt-client-session.node-id", "25%"))
        .column(
            ColumnDescriptor::new("clientType", "mqtt-client.client-type", "25%")
                .value(|session: &ShortClientSessionInfo| {
                    CellValue::key(session.client_type.translation_key())
                }),
        )
        .header_action(help_action(ctx))
        .row_action(disconnect_action(ctx))
        .row_action(remove_action(ctx))
        .on_row_click(move |session: ShortClientSessionInfo| {
            let ctx = details.clone();
            async move {
                let session = ctx.client.client_session_details(&session.client_id).await?;
                ctx.dialogs.session_details(&session).await;
                Ok(ActionOutcome::Reload)
            }
        })
        .translator(ctx.translator.clone())
        .notifier(ctx.notifier.clone())
        .build()
}

fn help_action(ctx: &ConsoleContext) -> ActionDescriptor<HeaderContext> {
    let navigator = ctx.navigator.clone();
    ActionDescriptor::new(HELP_ACTION, "help", move |_context: HeaderContext| {
        let result = navigator.open(SESSIONS_HELP_URL);
        async move { result.map(|()| ActionOutcome::None) }
    })
}

fn disconnect_action(ctx: &ConsoleContext) -> ActionDescriptor<ShortClientSessionInfo> {
    let ctx = ctx.clone();
    ActionDescriptor::new(
        DISCONNECT_ACTION,
        "portable_wifi_off",
        move |session: ShortClientSessionInfo| {
            let ctx = ctx.clone();
            async move {
                if !ctx.confirm(DISCONNECT_ACTION, &session.client_id).await {
                    return Ok(ActionOutcome::None);
                }
                ctx.client
                    .disconnect_client_session(&session.client_id, session.session_id)
                    .await?;
                ctx.success("mqtt-client-session.session-disconnected");
                Ok(ActionOutcome::Reload)
            }
        },
    )
    .enabled_when(|session| session.connection_state == ConnectionState::Connected)
}

fn remove_action(ctx: &ConsoleContext) -> ActionDescriptor<ShortClientSessionInfo> {
    let ctx = ctx.clone();
    ActionDescriptor::new(REMOVE_ACTION, "delete", move |session: ShortClientSessionInfo| {
        let ctx = ctx.clone();
        async move {
            if !ctx.confirm(REMOVE_ACTION, &session.client_id).await {
                return Ok(ActionOutcome::None);
            }
            ctx.client
                .remove_client_session(&session.client_id, session.session_id)
                .await?;
            ctx.success("mqtt-client-session.session-removed");
            Ok(ActionOutcome::Reload)
        }
    })
    .enabled_when(|session| session.connection_state == ConnectionState::Disconnected)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::error::ActionError;
    use crate::model::ClientType;
    use crate::table::ColumnWidth;
    use crate::table::RowClick;
    use crate::tables::Navigator;
    use crate::tables::RecordingDialogs;
    use crate::tables::context_at;
    use crate::tables::test_context;
    use serde_json::json;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;
    use wiremock::matchers::method;
    use wiremock::matchers::path;
    use wiremock::matchers::query_param;

    #[derive(Default)]
    struct RecordingNavigator {
        opened: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn open(&self, url: &str) -> Result<(), ActionError> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn session(state: ConnectionState) -> ShortClientSessionInfo {
        ShortClientSessionInfo {
            client_id: "sensor-1".into(),
            connection_state: state,
            client_type: ClientType::Device,
            node_id: Some("node-a".into()),
            session_id: None,
            subscriptions_count: Some(2),
            connected_at: None,
            disconnected_at: None,
        }
    }

    #[test]
    fn test_columns() {
        let table = sessions_table(&test_context());
        let keys: Vec<_> = table.columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["clientId", "connectionState", "nodeId", "clientType"]);
        assert!(
            table
                .columns()
                .iter()
                .all(|c| c.width == ColumnWidth::Percent(25))
        );
        assert!(table.flags().add_enabled);
        assert!(!table.flags().selection_enabled);
    }

    #[test]
    fn test_row_actions_follow_connection_state() {
        let table = sessions_table(&test_context());
        let [disconnect, remove] = table.row_actions() else {
            panic!("expected two row actions");
        };
        let connected = session(ConnectionState::Connected);
        let disconnected = session(ConnectionState::Disconnected);
        assert!(disconnect.is_enabled(&connected));
        assert!(!disconnect.is_enabled(&disconnected));
        assert!(remove.is_enabled(&disconnected));
        assert!(!remove.is_enabled(&connected));
    }

    #[tokio::test]
    async fn test_help_action_opens_docs() {
        let navigator = Arc::new(RecordingNavigator::default());
        let ctx = test_context().with_navigator(navigator.clone());
        let table = sessions_table(&ctx);
        let outcome = table.run_header_action(HELP_ACTION).await.unwrap();
        assert_eq!(outcome, ActionOutcome::None);
        assert_eq!(*navigator.opened.lock().unwrap(), [SESSIONS_HELP_URL]);
    }

    #[tokio::test]
    async fn test_row_click_shows_details_then_reloads() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SESSIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "clientId": "sensor-1",
                    "connectionState": "CONNECTED",
                    "clientType": "DEVICE",
                    "nodeId": "node-a"
                }],
                "totalPages": 1,
                "totalElements": 1,
                "hasNext": false
            })))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/client-session/details"))
            .and(query_param("clientId", "sensor-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "clientId": "sensor-1",
                "connectionState": "CONNECTED",
                "clientType": "DEVICE",
                "cleanStart": true,
                "subscriptions": [{"topic": "sensors/#", "qos": 1}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dialogs = Arc::new(RecordingDialogs::default());
        let ctx = context_at(&server.uri()).with_dialogs(dialogs.clone());
        let table = sessions_table(&ctx);
        assert!(table.init().await.is_some_and(|outcome| outcome.is_applied()));

        let click = table.handle_row_click(0).await.unwrap();
        assert_eq!(click, RowClick::Handled(ActionOutcome::Reload));
        assert_eq!(*dialogs.sessions.lock().unwrap(), ["sensor-1"]);
        assert_eq!(table.page().len(), 1);
    }
}
