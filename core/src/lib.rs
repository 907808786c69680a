// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::DateTime;
use chrono::Utc;
use reqwest::Method;
use reqwest::Url;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

mod api_client;
mod config;
mod credentials;
mod error;
mod group;
mod lifecycle;
mod paged_results;
mod query_params;
mod user;
mod users_client;
pub mod utils;

pub use api_client::*;
pub use config::*;
pub use credentials::*;
pub use error::*;
pub use group::*;
pub use lifecycle::*;
pub use paged_results::*;
pub use query_params::*;
pub use user::*;
pub use users_client::*;
pub use reqwest::StatusCode;
pub use utils::DeserializationError;
pub use utils::OneOrMany;

/// Unknown fields returned by the server, kept so they survive a
/// read-modify-write cycle.
pub type Extra = serde_json::Map<String, serde_json::Value>;
