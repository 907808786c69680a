// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// Returned by `activate`. Okta only fills this in when it was asked not to
/// send the activation email itself.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_token: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// Returned by `reset_password`, filled in when no email was sent.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_password_url: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TempPassword {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_password: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// The outcome of `expire_password`: either the password was only expired,
/// or a temporary password was issued as well.
#[derive(Clone, Debug, PartialEq)]
pub enum ExpiredPassword {
    Expired,
    TempPassword(TempPassword),
}

impl ExpiredPassword {
    pub fn temp_password(&self) -> Option<&str> {
        match self {
            ExpiredPassword::Expired => None,
            ExpiredPassword::TempPassword(t) => t.temp_password.as_deref(),
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_activation_response() {
        let response: ActivationResponse = serde_json::from_value(json!({
            "activationUrl": "https://example.okta.com/welcome/XE6wE17zmphl3KqAPFxO",
            "activationToken": "XE6wE17zmphl3KqAPFxO",
        }))
        .unwrap();

        assert_eq!(
            response.activation_token.as_deref(),
            Some("XE6wE17zmphl3KqAPFxO")
        );

        // sendEmail=true answers with an empty object
        let response: ActivationResponse =
            serde_json::from_value(json!({})).unwrap();
        assert_eq!(response, ActivationResponse::default());
    }

    #[test]
    fn test_expired_password_temp_password() {
        assert_eq!(ExpiredPassword::Expired.temp_password(), None);

        let temp: TempPassword =
            serde_json::from_value(json!({ "tempPassword": "HR076gb6" }))
                .unwrap();
        assert_eq!(
            ExpiredPassword::TempPassword(temp).temp_password(),
            Some("HR076gb6")
        );
    }
}
