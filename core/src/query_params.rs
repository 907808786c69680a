// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use crate::utils::skip_serializing_empty;

/// Query for `GET /api/v1/users`. Unset (or empty) fields are left out of the
/// request entirely.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
pub struct ListUsersParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Prefix match on first name, last name and email
    #[serde(default, skip_serializing_if = "skip_serializing_empty")]
    pub q: Option<String>,

    #[serde(default, skip_serializing_if = "skip_serializing_empty")]
    pub filter: Option<String>,

    #[serde(default, skip_serializing_if = "skip_serializing_empty")]
    pub search: Option<String>,
}

/// Query for one page of `GET /api/v1/users`.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
pub struct PagedUsersParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Resume listing after this user id
    #[serde(default, skip_serializing_if = "skip_serializing_empty")]
    pub after: Option<String>,

    #[serde(default, skip_serializing_if = "skip_serializing_empty")]
    pub filter: Option<String>,

    #[serde(default, skip_serializing_if = "skip_serializing_empty")]
    pub search: Option<String>,

    /// A continuation URL. When set, it is requested as is and every other
    /// field is ignored.
    #[serde(skip)]
    pub url: Option<String>,
}

impl PagedUsersParams {
    /// Fetch the page a previous `PagedResults::next_url` pointed at.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self { url: Some(url.into()), ..Default::default() }
    }

    pub(crate) fn continuation_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct ActivateParam {
    pub activate: bool,
}

#[derive(Serialize, Debug)]
pub(crate) struct SendEmailParam {
    #[serde(rename = "sendEmail")]
    pub send_email: bool,
}

#[derive(Serialize, Debug)]
pub(crate) struct TempPasswordParam {
    #[serde(rename = "tempPassword")]
    pub temp_password: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    fn encode<T: Serialize>(params: &T) -> String {
        let request = reqwest::blocking::Client::new()
            .get("https://example.okta.com/api/v1/users")
            .query(params)
            .build()
            .unwrap();

        request.url().query().unwrap_or_default().to_string()
    }

    #[test]
    fn test_list_params_skip_unset() {
        assert_eq!(encode(&ListUsersParams::default()), "");

        let params = ListUsersParams {
            limit: Some(25),
            q: Some(String::new()),
            filter: Some(String::from("status eq \"ACTIVE\"")),
            search: None,
        };

        assert_eq!(
            encode(&params),
            "limit=25&filter=status+eq+%22ACTIVE%22"
        );
    }

    #[test]
    fn test_paged_params_url_not_serialized() {
        let params = PagedUsersParams {
            after: Some(String::from("00u1")),
            url: Some(String::from("https://example.okta.com/next")),
            ..Default::default()
        };

        assert_eq!(encode(&params), "after=00u1");
        assert_eq!(
            params.continuation_url(),
            Some("https://example.okta.com/next")
        );
        assert_eq!(PagedUsersParams::from_url("").continuation_url(), None);
    }

    #[test]
    fn test_flag_params() {
        assert_eq!(encode(&ActivateParam { activate: false }), "activate=false");
        assert_eq!(
            encode(&SendEmailParam { send_email: true }),
            "sendEmail=true"
        );
        assert_eq!(
            encode(&TempPasswordParam { temp_password: true }),
            "tempPassword=true"
        );
    }
}
