// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// A password value. Okta never echoes the value back, so responses carry
/// an empty object here.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
pub struct PasswordCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl PasswordCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: Some(value.into()) }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
pub struct RecoveryQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
pub struct AuthenticationProvider {
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub provider_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// Okta spells `recovery_question` in snake case on the wire, unlike every
// other attribute.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
pub struct LoginCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordCredential>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_question: Option<RecoveryQuestion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<AuthenticationProvider>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `POST /{id}/credentials/change_password`
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: PasswordCredential,
    pub new_password: PasswordCredential,
}

impl ChangePasswordRequest {
    pub fn new(old_password: &str, new_password: &str) -> Self {
        Self {
            old_password: PasswordCredential::new(old_password),
            new_password: PasswordCredential::new(new_password),
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_change_password_body() {
        let request = ChangePasswordRequest::new("tlpWENT2m", "uTVM,TPw55");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "oldPassword": { "value": "tlpWENT2m" },
                "newPassword": { "value": "uTVM,TPw55" },
            })
        );
    }

    #[test]
    fn test_parse_empty_password() {
        let credentials: LoginCredentials = serde_json::from_value(json!({
            "password": {},
            "provider": { "type": "OKTA", "name": "OKTA" },
        }))
        .unwrap();

        assert_eq!(credentials.password, Some(PasswordCredential::default()));
        assert!(credentials.recovery_question.is_none());
    }
}
