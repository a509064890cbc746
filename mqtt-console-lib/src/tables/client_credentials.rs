//! Client credentials table.

use crate::api::CREDENTIALS_PATH;
use crate::error::ActionError;
use crate::error::ValidationError;
use crate::fetcher::ApiFetcher;
use crate::format::format_timestamp;
use crate::model::ChangePasswordRequest;
use crate::model::CredentialsType;
use crate::model::ShortMqttClientCredentials;
use crate::table::ActionDescriptor;
use crate::table::ActionOutcome;
use crate::table::CellValue;
use crate::table::ColumnDescriptor;
use crate::table::EntityTableConfig;

use super::ConsoleContext;

pub const CHANGE_PASSWORD_ACTION: &str = "mqtt-client-credentials.change-password";
pub const DELETE_CREDENTIALS_ACTION: &str = "mqtt-client-credentials.delete";

pub fn client_credentials_table(
    ctx: &ConsoleContext,
) -> EntityTableConfig<ShortMqttClientCredentials> {
    EntityTableConfig::builder(ApiFetcher::new(ctx.client.clone(), CREDENTIALS_PATH))
        .title("mqtt-client-credentials.client-credentials")
        .entity_translations(
            "mqtt-client-credentials.no-client-credentials-text",
            "mqtt-client-credentials.search",
        )
        .add_enabled(true)
        .column(
            ColumnDescriptor::new("createdTime", "common.created-time", "15%").value(
                |credentials: &ShortMqttClientCredentials| {
                    format_timestamp(credentials.created_time).into()
                },
            ),
        )
        .column(ColumnDescriptor::new("name", "mqtt-client-credentials.name", "45%"))
        .column(
            ColumnDescriptor::new("clientType", "mqtt-client.client-type", "20%").value(
                |credentials: &ShortMqttClientCredentials| {
                    CellValue::key(credentials.client_type.translation_key())
                },
            ),
        )
        .column(
            ColumnDescriptor::new("credentialsType", "mqtt-client-credentials.type", "20%").value(
                |credentials: &ShortMqttClientCredentials| {
                    CellValue::key(credentials.credentials_type.translation_key())
                },
            ),
        )
        .row_action(change_password_action(ctx))
        .row_action(delete_action(ctx))
        .translator(ctx.translator.clone())
        .notifier(ctx.notifier.clone())
        .build()
}

fn change_password_action(ctx: &ConsoleContext) -> ActionDescriptor<ShortMqttClientCredentials> {
    let ctx = ctx.clone();
    ActionDescriptor::new(
        CHANGE_PASSWORD_ACTION,
        "lock",
        move |credentials: ShortMqttClientCredentials| {
            let ctx = ctx.clone();
            async move {
                let Some(change) = ctx.dialogs.change_password(&credentials).await else {
                    return Ok(ActionOutcome::None);
                };
                let request = match ChangePasswordRequest::new(
                    change.current,
                    change.new,
                    &change.confirmation,
                ) {
                    Ok(request) => request,
                    Err(ValidationError::PasswordMismatch) => {
                        return Err(ActionError::message(
                            ctx.translator.translate("login.passwords-mismatch-error"),
                        ));
                    }
                    Err(err) => return Err(err.into()),
                };
                ctx.client
                    .change_client_password(credentials.id, &request)
                    .await?;
                ctx.success("mqtt-client-credentials.password-changed");
                Ok(ActionOutcome::None)
            }
        },
    )
    .enabled_when(|credentials| credentials.credentials_type == CredentialsType::MqttBasic)
}

fn delete_action(ctx: &ConsoleContext) -> ActionDescriptor<ShortMqttClientCredentials> {
    let ctx = ctx.clone();
    ActionDescriptor::new(
        DELETE_CREDENTIALS_ACTION,
        "delete",
        move |credentials: ShortMqttClientCredentials| {
            let ctx = ctx.clone();
            async move {
                if !ctx.confirm(DELETE_CREDENTIALS_ACTION, &credentials.name).await {
                    return Ok(ActionOutcome::None);
                }
                ctx.client.delete_client_credentials(credentials.id).await?;
                ctx.success("mqtt-client-credentials.deleted");
                Ok(ActionOutcome::Reload)
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::model::ClientType;
    use crate::model::DetailedClientSessionInfo;
    use crate::notify::Notification;
    use crate::notify::NotificationLevel;
    use crate::notify::NotificationSink;
    use crate::tables::Dialogs;
    use crate::tables::PasswordChange;
    use crate::tables::test_context;

    struct MismatchedPassword;

    #[async_trait]
    impl Dialogs for MismatchedPassword {
        async fn confirm(&self, _title: &str, _message: &str) -> bool {
            false
        }

        async fn change_password(
            &self,
            _credentials: &ShortMqttClientCredentials,
        ) -> Option<PasswordChange> {
            Some(PasswordChange {
                current: "old".into(),
                new: "secret-1".into(),
                confirmation: "secret-2".into(),
            })
        }

        async fn session_details(&self, _session: &DetailedClientSessionInfo) {}
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<Notification>>);

    impl NotificationSink for Collect {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    fn credentials(credentials_type: CredentialsType) -> ShortMqttClientCredentials {
        ShortMqttClientCredentials {
            id: Uuid::new_v4(),
            name: "sensors".into(),
            client_type: ClientType::Device,
            credentials_type,
            created_time: 0,
        }
    }

    #[test]
    fn test_change_password_only_for_basic() {
        let table = client_credentials_table(&test_context());
        let change = &table.row_actions()[0];
        assert_eq!(change.name, CHANGE_PASSWORD_ACTION);
        assert!(change.is_enabled(&credentials(CredentialsType::MqttBasic)));
        assert!(!change.is_enabled(&credentials(CredentialsType::Ssl)));
        assert!(table.row_actions()[1].is_enabled(&credentials(CredentialsType::Ssl)));
    }

    #[tokio::test]
    async fn test_password_mismatch_is_reported() {
        let sink = Arc::new(Collect::default());
        let ctx = test_context()
            .with_dialogs(Arc::new(MismatchedPassword))
            .with_notifier(sink.clone());
        let change = change_password_action(&ctx);

        let err = change
            .invoke(credentials(CredentialsType::MqttBasic))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Entered passwords must be same!");
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_declined_delete_does_nothing() {
        let sink = Arc::new(Collect::default());
        let ctx = test_context().with_notifier(sink.clone());
        let outcome = delete_action(&ctx)
            .invoke(credentials(CredentialsType::Ssl))
            .await
            .unwrap();
        assert_eq!(outcome, ActionOutcome::None);
        assert!(
            sink.0
                .lock()
                .unwrap()
                .iter()
                .all(|n| n.level != NotificationLevel::Success)
        );
    }
}
