// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An in-memory stand-in for Okta's Users API, for exercising `okta-users`
//! without a real org.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::anyhow;
use dropshot::ApiDescription;
use dropshot::Body;
use dropshot::ConfigDropshot;
use dropshot::HttpError;
use dropshot::HttpServer;
use dropshot::Path;
use dropshot::Query;
use dropshot::RequestContext;
use dropshot::ServerBuilder;
use dropshot::TypedBody;
use dropshot::endpoint;
use http::Response;
use http::StatusCode;
use okta_users::ApiError;
use okta_users::User;
use okta_users::UserStatus;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use slog::Drain;
use slog::Logger;
use slog::info;

mod lifecycle;
mod store;
mod users;

pub use store::*;

pub type Server = HttpServer<Arc<ServerContext>>;

/// One request as it arrived, for asserting on what a client sent.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

pub struct ServerContext {
    store: Mutex<Store>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl Default for ServerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerContext {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store::new()),
            requests: Mutex::new(vec![]),
        }
    }

    /// Run `f` against the store. Tests use this to set up state the API
    /// cannot reach, like a locked out user.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        let mut store = self.store.lock().unwrap();
        f(&mut store)
    }

    /// Every request served so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record(&self, rqctx: &RequestContext<Arc<ServerContext>>) {
        let uri = rqctx.request.uri();
        let authorization = rqctx
            .request
            .headers()
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        self.requests.lock().unwrap().push(RecordedRequest {
            method: rqctx.request.method().to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(String::from),
            authorization,
        });
    }
}

/// Serialize `body` as the JSON response.
fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<Response<Body>, HttpError> {
    let serialized = serde_json::to_string(body)
        .map_err(|e| HttpError::for_internal_error(e.to_string()))?;

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serialized.into())
        .map_err(|e| HttpError::for_internal_error(e.to_string()))
}

fn store_response<T: Serialize>(
    status: StatusCode,
    result: Result<T, StoreError>,
) -> Result<Response<Body>, HttpError> {
    match result {
        Ok(body) => json_response(status, &body),
        Err(StoreError { status, error }) => json_response(status, &error),
    }
}

pub fn api() -> anyhow::Result<ApiDescription<Arc<ServerContext>>> {
    let mut api = ApiDescription::new();

    api.register(users::list_users).map_err(|e| anyhow!("{e}"))?;
    api.register(users::create_user).map_err(|e| anyhow!("{e}"))?;
    api.register(users::get_user).map_err(|e| anyhow!("{e}"))?;
    api.register(users::put_user).map_err(|e| anyhow!("{e}"))?;
    api.register(users::post_user).map_err(|e| anyhow!("{e}"))?;
    api.register(users::delete_user).map_err(|e| anyhow!("{e}"))?;
    api.register(users::get_user_groups).map_err(|e| anyhow!("{e}"))?;
    api.register(users::get_user_app_links).map_err(|e| anyhow!("{e}"))?;
    api.register(lifecycle::lifecycle_operation)
        .map_err(|e| anyhow!("{e}"))?;
    api.register(lifecycle::change_password).map_err(|e| anyhow!("{e}"))?;

    Ok(api)
}

/// Start serving on the current tokio runtime. Bind to port 0 to get an
/// ephemeral port; `Server::local_addr` reports it.
pub fn create_http_server(
    log: Logger,
    bind_address: SocketAddr,
) -> anyhow::Result<Server> {
    let config = ConfigDropshot { bind_address, ..Default::default() };

    let server =
        ServerBuilder::new(api()?, Arc::new(ServerContext::new()), log.clone())
            .config(config)
            .start()
            .map_err(|e| anyhow!("failed to start server: {e}"))?;

    info!(log, "serving users api"; "address" => %server.local_addr());

    Ok(server)
}

pub fn stderr_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(drain, slog::o!())
}
