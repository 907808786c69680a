// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[derive(Deserialize, JsonSchema)]
pub struct UserPathParam {
    pub user_id: String,
}

#[derive(Deserialize, JsonSchema)]
pub struct CreateUserQuery {
    activate: Option<bool>,
}

/// The `Link` header values for a page: always `self`, and `next` when more
/// users remain.
fn link_headers(
    rqctx: &RequestContext<Arc<ServerContext>>,
    query: &ListUsersQuery,
    next: Option<&ListUsersQuery>,
) -> Result<Vec<String>, HttpError> {
    let host = rqctx
        .request
        .headers()
        .get(http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("127.0.0.1")
        .to_string();

    let link = |query: &ListUsersQuery, rel: &str| {
        let encoded = serde_urlencoded::to_string(query)
            .map_err(|e| HttpError::for_internal_error(e.to_string()))?;

        let url = if encoded.is_empty() {
            format!("http://{host}/api/v1/users")
        } else {
            format!("http://{host}/api/v1/users?{encoded}")
        };

        Ok::<_, HttpError>(format!("<{url}>; rel=\"{rel}\""))
    };

    let mut links = vec![link(query, "self")?];
    if let Some(next) = next {
        links.push(link(next, "next")?);
    }

    Ok(links)
}

#[endpoint {
    method = GET,
    path = "/api/v1/users"
}]
pub async fn list_users(
    rqctx: RequestContext<Arc<ServerContext>>,
    query_params: Query<ListUsersQuery>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    apictx.record(&rqctx);
    let query = query_params.into_inner();

    let page = apictx.with_store(|store| store.list_users(&query));

    let page = match page {
        Ok(page) => page,
        Err(StoreError { status, error }) => {
            return json_response(status, &error);
        }
    };

    let links = link_headers(&rqctx, &query, page.next.as_ref())?;
    let serialized = serde_json::to_string(&page.users)
        .map_err(|e| HttpError::for_internal_error(e.to_string()))?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json");

    for link in links {
        builder = builder.header("Link", link);
    }

    builder
        .body(serialized.into())
        .map_err(|e| HttpError::for_internal_error(e.to_string()))
}

#[endpoint {
    method = POST,
    path = "/api/v1/users"
}]
pub async fn create_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    query_params: Query<CreateUserQuery>,
    body: TypedBody<User>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    apictx.record(&rqctx);
    let activate = query_params.into_inner().activate;
    let user = body.into_inner();

    store_response(
        StatusCode::OK,
        apictx.with_store(|store| store.create_user(user, activate)),
    )
}

#[endpoint {
    method = GET,
    path = "/api/v1/users/{user_id}"
}]
pub async fn get_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    apictx.record(&rqctx);
    let path_param = path_param.into_inner();

    store_response(
        StatusCode::OK,
        apictx.with_store(|store| store.get_user(&path_param.user_id)),
    )
}

#[endpoint {
    method = PUT,
    path = "/api/v1/users/{user_id}"
}]
pub async fn put_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
    body: TypedBody<User>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    apictx.record(&rqctx);
    let path_param = path_param.into_inner();
    let user = body.into_inner();

    store_response(
        StatusCode::OK,
        apictx.with_store(|store| {
            store.replace_user(&path_param.user_id, user)
        }),
    )
}

#[endpoint {
    method = POST,
    path = "/api/v1/users/{user_id}"
}]
pub async fn post_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
    body: TypedBody<User>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    apictx.record(&rqctx);
    let path_param = path_param.into_inner();
    let user = body.into_inner();

    store_response(
        StatusCode::OK,
        apictx
            .with_store(|store| store.update_user(&path_param.user_id, user)),
    )
}

#[endpoint {
    method = DELETE,
    path = "/api/v1/users/{user_id}"
}]
pub async fn delete_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    apictx.record(&rqctx);
    let path_param = path_param.into_inner();

    match apictx.with_store(|store| store.delete_user(&path_param.user_id)) {
        Ok(()) => Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(Body::empty())
            .map_err(|e| HttpError::for_internal_error(e.to_string())),

        Err(StoreError { status, error }) => json_response(status, &error),
    }
}

#[endpoint {
    method = GET,
    path = "/api/v1/users/{user_id}/groups"
}]
pub async fn get_user_groups(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    apictx.record(&rqctx);
    let path_param = path_param.into_inner();

    store_response(
        StatusCode::OK,
        apictx.with_store(|store| store.user_groups(&path_param.user_id)),
    )
}

#[endpoint {
    method = GET,
    path = "/api/v1/users/{user_id}/appLinks"
}]
pub async fn get_user_app_links(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    apictx.record(&rqctx);
    let path_param = path_param.into_inner();

    store_response(
        StatusCode::OK,
        apictx.with_store(|store| store.app_links(&path_param.user_id)),
    )
}
