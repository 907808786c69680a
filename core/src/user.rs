// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// Okta's user lifecycle states.
///
/// A status this client does not know about is kept verbatim in `Unknown`,
/// so it goes back to the server exactly as it came.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "String", into = "String")]
pub enum UserStatus {
    Staged,
    Provisioned,
    Active,
    Recovery,
    PasswordExpired,
    LockedOut,
    Suspended,
    Deprovisioned,
    Unknown(String),
}

impl UserStatus {
    pub fn as_str(&self) -> &str {
        match self {
            UserStatus::Staged => "STAGED",
            UserStatus::Provisioned => "PROVISIONED",
            UserStatus::Active => "ACTIVE",
            UserStatus::Recovery => "RECOVERY",
            UserStatus::PasswordExpired => "PASSWORD_EXPIRED",
            UserStatus::LockedOut => "LOCKED_OUT",
            UserStatus::Suspended => "SUSPENDED",
            UserStatus::Deprovisioned => "DEPROVISIONED",
            UserStatus::Unknown(status) => status.as_str(),
        }
    }
}

impl From<String> for UserStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "STAGED" => UserStatus::Staged,
            "PROVISIONED" => UserStatus::Provisioned,
            "ACTIVE" => UserStatus::Active,
            "RECOVERY" => UserStatus::Recovery,
            "PASSWORD_EXPIRED" => UserStatus::PasswordExpired,
            "LOCKED_OUT" => UserStatus::LockedOut,
            "SUSPENDED" => UserStatus::Suspended,
            "DEPROVISIONED" => UserStatus::Deprovisioned,
            _ => UserStatus::Unknown(status),
        }
    }
}

impl From<UserStatus> for String {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Unknown(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// On the wire a status is just a string.
impl JsonSchema for UserStatus {
    fn schema_name() -> String {
        String::from("UserStatus")
    }

    fn json_schema(
        generator: &mut schemars::r#gen::SchemaGenerator,
    ) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,

    /// Custom profile attributes
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Assigned by Okta; absent on payloads for users not created yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activated: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_changed: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_changed: Option<DateTime<Utc>>,

    #[serde(default)]
    pub profile: UserProfile,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<LoginCredentials>,

    /// Fields not modelled above, e.g. `_links` and `_embedded`
    #[serde(flatten)]
    pub extra: Extra,
}

impl User {
    /// A user payload with the usual required profile attributes set, ready
    /// for `create_user`.
    pub fn new(
        login: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        User {
            profile: UserProfile {
                login: Some(login.into()),
                email: Some(email.into()),
                first_name: Some(first_name.into()),
                last_name: Some(last_name.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        let mut credentials = self.credentials.take().unwrap_or_default();
        credentials.password = Some(PasswordCredential::new(password));
        self.credentials = Some(credentials);
        self
    }

    pub fn login(&self) -> Option<&str> {
        self.profile.login.as_deref()
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_okta_user() {
        let json = json!({
          "id": "00ub0oNGTSWTBKOLGLNR",
          "status": "ACTIVE",
          "created": "2013-06-24T16:39:18.000Z",
          "activated": "2013-06-24T16:39:19.000Z",
          "statusChanged": "2013-06-24T16:39:19.000Z",
          "lastLogin": "2013-06-24T17:39:19.000Z",
          "lastUpdated": "2013-06-27T16:35:28.000Z",
          "passwordChanged": "2013-06-24T16:39:19.000Z",
          "profile": {
            "login": "isaac.brock@example.com",
            "firstName": "Isaac",
            "lastName": "Brock",
            "email": "isaac.brock@example.com",
            "mobilePhone": "555-415-1337",
            "nickName": "issac"
          },
          "credentials": {
            "password": {},
            "recovery_question": {
              "question": "Who's a major player in the cowboy scene?"
            },
            "provider": {
              "type": "OKTA",
              "name": "OKTA"
            }
          },
          "_links": {
            "self": {
              "href": "https://example.okta.com/api/v1/users/00ub0oNGTSWTBKOLGLNR"
            }
          }
        });

        let user: User = serde_json::from_value(json).unwrap();

        assert_eq!(user.id.as_deref(), Some("00ub0oNGTSWTBKOLGLNR"));
        assert_eq!(user.status, Some(UserStatus::Active));
        assert_eq!(user.login(), Some("isaac.brock@example.com"));
        assert_eq!(user.profile.mobile_phone.as_deref(), Some("555-415-1337"));
        assert_eq!(user.profile.extra.get("nickName"), Some(&json!("issac")));
        assert!(user.extra.contains_key("_links"));

        let credentials = user.credentials.unwrap();
        assert_eq!(
            credentials.provider.unwrap().provider_type.as_deref(),
            Some("OKTA")
        );
        assert_eq!(
            credentials.recovery_question.unwrap().question.as_deref(),
            Some("Who's a major player in the cowboy scene?")
        );
    }

    #[test]
    fn test_unknown_status() {
        let user: User =
            serde_json::from_value(json!({ "status": "SOMETHING_NEW" }))
                .unwrap();
        assert_eq!(
            user.status,
            Some(UserStatus::Unknown(String::from("SOMETHING_NEW")))
        );
        assert_eq!(user.status.unwrap().to_string(), "SOMETHING_NEW");
    }

    #[test]
    fn test_known_status_strings() {
        for status in [
            UserStatus::Staged,
            UserStatus::PasswordExpired,
            UserStatus::LockedOut,
            UserStatus::Deprovisioned,
        ] {
            let json = serde_json::to_value(&status).unwrap();
            assert_eq!(json, json!(status.as_str()));
            assert_eq!(serde_json::from_value::<UserStatus>(json).unwrap(), status);
        }
    }

    #[test]
    fn test_empty_object_is_empty_user() {
        let user: User = serde_json::from_value(json!({})).unwrap();
        assert_eq!(user, User::default());
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let user = User::new("a@example.com", "a@example.com", "A", "B")
            .with_password("tlpWENT2m");

        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({
                "profile": {
                    "login": "a@example.com",
                    "email": "a@example.com",
                    "firstName": "A",
                    "lastName": "B",
                },
                "credentials": {
                    "password": { "value": "tlpWENT2m" }
                }
            })
        );
    }

    #[test]
    fn test_round_trip_keeps_extra_fields() {
        let json = json!({
            "id": "00u1",
            "profile": { "login": "a@example.com", "costCenter": "10" },
            "_embedded": { "foo": 1 },
        });

        let user: User = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&user).unwrap(), json);
    }

    #[test]
    fn test_round_trip_keeps_unknown_status() {
        let json = json!({
            "id": "00u1",
            "status": "SOMETHING_NEW",
            "profile": {},
        });

        let user: User = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&user).unwrap(), json);
    }
}
