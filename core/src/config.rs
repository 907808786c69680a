// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use std::time::Duration;

/// How requests are authorized. The token is passed through verbatim.
#[derive(Clone)]
pub enum Credentials {
    /// An Okta API token, sent as `Authorization: SSWS <token>`
    Ssws(String),

    /// An OAuth 2.0 access token, sent as `Authorization: Bearer <token>`
    Bearer(String),
}

impl Credentials {
    pub fn authorization_header(&self) -> String {
        match self {
            Credentials::Ssws(token) => format!("SSWS {token}"),
            Credentials::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

// Keep tokens out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Credentials::Ssws(_) => write!(f, "Ssws(..)"),
            Credentials::Bearer(_) => write!(f, "Bearer(..)"),
        }
    }
}

/// Everything a client needs to talk to an Okta org. Fixed once the client
/// is built.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// The org URL, e.g. `https://example.okta.com`
    pub base_url: String,

    pub credentials: Credentials,

    pub timeout: Option<Duration>,

    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: Credentials::Ssws(api_token.into()),
            timeout: None,
            user_agent: format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ),
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The URL every users endpoint hangs off: `<base_url>/api/v1/users`
    pub fn users_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            Error::InvalidConfig(format!(
                "base url {} does not parse: {e}",
                self.base_url
            ))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                Error::InvalidConfig(format!(
                    "base url {} cannot have a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["api", "v1", "users"]);

        Ok(url)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_users_url() {
        let config = ClientConfig::new("https://example.okta.com", "token");
        assert_eq!(
            config.users_url().unwrap().as_str(),
            "https://example.okta.com/api/v1/users"
        );

        let config = ClientConfig::new("https://example.okta.com/", "token");
        assert_eq!(
            config.users_url().unwrap().as_str(),
            "https://example.okta.com/api/v1/users"
        );

        let config = ClientConfig::new("not a url", "token");
        assert!(matches!(config.users_url(), Err(Error::InvalidConfig(_))));

        let config = ClientConfig::new("mailto:someone@example.com", "token");
        assert!(matches!(config.users_url(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_authorization_header() {
        assert_eq!(
            Credentials::Ssws(String::from("00abc")).authorization_header(),
            "SSWS 00abc"
        );
        assert_eq!(
            Credentials::Bearer(String::from("eyJ")).authorization_header(),
            "Bearer eyJ"
        );
        assert_eq!(
            format!("{:?}", Credentials::Ssws(String::from("secret"))),
            "Ssws(..)"
        );
    }
}
