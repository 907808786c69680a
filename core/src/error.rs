// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// A single cause attached to an Okta error response
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorCause {
    pub error_summary: String,
}

/// The error body Okta returns alongside a non-2xx status
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub error_code: String,

    pub error_summary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,

    #[serde(default)]
    pub error_causes: Vec<ApiErrorCause>,
}

impl ApiError {
    pub fn new(error_code: &str, error_summary: impl Into<String>) -> Self {
        Self {
            error_code: error_code.to_string(),
            error_summary: error_summary.into(),
            error_link: Some(error_code.to_string()),
            error_id: None,
            error_causes: vec![],
        }
    }

    pub fn with_cause(mut self, summary: impl Into<String>) -> Self {
        self.error_causes.push(ApiErrorCause { error_summary: summary.into() });
        self
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.error_summary, self.error_code)?;

        for cause in &self.error_causes {
            write!(f, "; {}", cause.error_summary)?;
        }

        Ok(())
    }
}

fn describe_api_error(error: &Option<ApiError>) -> String {
    match error {
        Some(error) => error.to_string(),
        None => String::from("no error body"),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("building request failed")]
    Request(#[source] reqwest::Error),

    #[error("{method} {url} failed")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status. No further inspection is
    /// done here; the caller decides what a given status means.
    #[error("{method} {url} returned {status}: {}", describe_api_error(.error))]
    Api {
        method: Method,
        url: String,
        status: StatusCode,
        error: Option<ApiError>,
    },

    #[error(transparent)]
    Deserialization(#[from] DeserializationError),

    #[error("user has no id to address it by")]
    MissingUserId,

    /// `.` and `..` would be resolved away and address another resource
    #[error("{0:?} cannot be used as a path segment")]
    InvalidPathSegment(String),

    #[error("there is no next page")]
    NoNextPage,
}

impl Error {
    /// The HTTP status, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport { source, .. } => source.status(),
            _ => None,
        }
    }

    /// The Okta error code (e.g. `E0000007`), if the server sent one
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Error::Api { error: Some(error), .. } => Some(&error.error_code),
            _ => None,
        }
    }
}
