//! Client credentials models

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::ClientType;
use crate::error::ValidationError;

/// How a client authenticates against the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialsType {
    MqttBasic,
    Ssl,
}

impl CredentialsType {
    /// Translation key for the credentials type label.
    pub fn translation_key(&self) -> &'static str {
        match self {
            Self::MqttBasic => "mqtt-client-credentials.type-basic",
            Self::Ssl => "mqtt-client-credentials.type-ssl",
        }
    }
}

/// Credentials row as listed in the credentials table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortMqttClientCredentials {
    pub id: Uuid,
    pub name: String,
    pub client_type: ClientType,
    pub credentials_type: CredentialsType,
    /// Epoch milliseconds.
    pub created_time: i64,
}

/// Body of a basic-credentials password change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: String,
}

impl ChangePasswordRequest {
    /// Builds a request from the entered values, checking the confirmation.
    ///
    /// An empty current password is sent as absent; credentials created
    /// without a password accept that.
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
        confirmation: &str,
    ) -> Result<Self, ValidationError> {
        let current_password = current_password.into();
        let new_password = new_password.into();
        if new_password.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "newPassword",
            });
        }
        if new_password != confirmation {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(Self {
            current_password: (!current_password.is_empty()).then_some(current_password),
            new_password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_confirmation() {
        assert_eq!(
            ChangePasswordRequest::new("old", "new1", "new2"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_empty_new_password() {
        assert!(matches!(
            ChangePasswordRequest::new("old", "", ""),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn test_blank_current_password_is_omitted() {
        let req = ChangePasswordRequest::new("", "secret", "secret").unwrap();
        assert_eq!(req.current_password, None);
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["newPassword"], "secret");
        assert!(body["currentPassword"].is_null());
    }
}
