// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::blocking::Response;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use slog::Logger;
use slog::debug;
use slog::o;
use slog::warn;

/// The HTTP plumbing under `UsersClient`: resolves paths against the users
/// resource URL, attaches the configured headers, and turns non-2xx
/// responses into `Error::Api`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    log: Logger,
    resource_url: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(log: Logger, config: &ClientConfig) -> Result<Self, Error> {
        let resource_url = config.users_url()?;

        let mut authorization =
            HeaderValue::from_str(&config.credentials.authorization_header())
                .map_err(|e| {
                    Error::InvalidConfig(format!(
                        "api token is not a valid header value: {e}"
                    ))
                })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::AUTHORIZATION, authorization);

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            Error::InvalidConfig(format!("building http client failed: {e}"))
        })?;

        let log = log.new(o!(
            "component" => "okta-users",
            "resource_url" => resource_url.to_string()
        ));

        Ok(Self { log, resource_url, client })
    }

    pub fn resource_url(&self) -> &Url {
        &self.resource_url
    }

    /// The resource URL with `segments` appended. Each segment is percent
    /// encoded, so ids and logins are always a single path segment.
    ///
    /// `.` and `..` cannot be sent as a segment at all: URL parsing resolves
    /// them, encoded or not, so they are refused here.
    pub fn url_for(&self, segments: &[&str]) -> Result<Url, Error> {
        if let Some(segment) =
            segments.iter().find(|s| matches!(**s, "." | ".."))
        {
            return Err(Error::InvalidPathSegment(segment.to_string()));
        }

        let mut url = self.resource_url.clone();

        // `users_url` already rejected URLs that cannot take a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }

        Ok(url)
    }

    /// Start a request against a path under the users resource.
    pub fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, Error> {
        Ok(self.client.request(method, self.url_for(segments)?))
    }

    /// Start a request against an absolute URL, used verbatim.
    pub fn request_url(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send a request. Any 2xx response is handed back untouched; anything
    /// else becomes `Error::Api`.
    pub fn execute(&self, request: RequestBuilder) -> Result<Response, Error> {
        let (_, _, response) = self.send(request)?;
        Ok(response)
    }

    /// Send a request and return its body as text.
    pub fn execute_text(&self, request: RequestBuilder) -> Result<String, Error> {
        let (method, url, response) = self.send(request)?;

        response.text().map_err(|source| Error::Transport { method, url, source })
    }

    fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<(Method, String, Response), Error> {
        let request = request.build().map_err(Error::Request)?;

        let method = request.method().clone();
        let url = request.url().to_string();

        debug!(self.log, "sending request"; "method" => %method, "url" => &url);

        let response = self.client.execute(request).map_err(|source| {
            Error::Transport { method: method.clone(), url: url.clone(), source }
        })?;

        let status = response.status();
        debug!(self.log, "received response";
            "method" => %method,
            "url" => &url,
            "status" => status.as_u16()
        );

        if status.is_success() {
            return Ok((method, url, response));
        }

        // Okta describes most failures in the body; a body that does not
        // parse is still reported by status alone.
        let error = response
            .text()
            .ok()
            .and_then(|body| serde_json::from_str::<ApiError>(&body).ok());

        warn!(self.log, "request failed";
            "method" => %method,
            "url" => &url,
            "status" => status.as_u16(),
            "error_code" => error.as_ref().map(|e| e.error_code.clone())
        );

        Err(Error::Api { method, url, status, error })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn api_client(base_url: &str) -> ApiClient {
        let log = Logger::root(slog::Discard, o!());
        ApiClient::new(log, &ClientConfig::new(base_url, "00abc")).unwrap()
    }

    #[test]
    fn test_url_for_encodes_segments() {
        let api = api_client("https://example.okta.com/");

        assert_eq!(
            api.resource_url().as_str(),
            "https://example.okta.com/api/v1/users"
        );
        assert_eq!(api.url_for(&[]).unwrap(), *api.resource_url());
        assert_eq!(
            api.url_for(&["00u1", "lifecycle", "activate"]).unwrap().as_str(),
            "https://example.okta.com/api/v1/users/00u1/lifecycle/activate"
        );
        assert_eq!(
            api.url_for(&["a/b?c#d"]).unwrap().as_str(),
            "https://example.okta.com/api/v1/users/a%2Fb%3Fc%23d"
        );

        // Dots only count as dot segments on their own
        assert_eq!(
            api.url_for(&["...", ".a"]).unwrap().as_str(),
            "https://example.okta.com/api/v1/users/.../.a"
        );
    }

    #[test]
    fn test_url_for_refuses_dot_segments() {
        let api = api_client("https://example.okta.com");

        for id in [".", ".."] {
            assert!(matches!(
                api.url_for(&[id, "lifecycle", "unlock"]),
                Err(Error::InvalidPathSegment(s)) if s == id
            ));
            assert!(matches!(
                api.request(Method::DELETE, &[id]),
                Err(Error::InvalidPathSegment(_))
            ));
        }
    }

    #[test]
    fn test_request_url_is_verbatim() {
        let api = api_client("https://example.okta.com");

        let request = api
            .request_url(
                Method::GET,
                "https://example.okta.com/api/v1/users?after=00u1&limit=2",
            )
            .build()
            .unwrap();

        assert_eq!(request.url().query(), Some("after=00u1&limit=2"));
    }

    #[test]
    fn test_token_must_be_a_header_value() {
        let log = Logger::root(slog::Discard, o!());
        let config = ClientConfig::new("https://example.okta.com", "bad\ntoken");

        assert!(matches!(
            ApiClient::new(log, &config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
