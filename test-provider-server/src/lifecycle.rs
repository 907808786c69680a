// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use okta_users::ChangePasswordRequest;

use crate::users::UserPathParam;

#[derive(Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleOperation {
    Activate,
    Deactivate,
    Unlock,
    ResetPassword,
    ExpirePassword,
}

#[derive(Deserialize, JsonSchema)]
pub struct LifecyclePathParam {
    user_id: String,
    operation: LifecycleOperation,
}

#[derive(Deserialize, JsonSchema)]
pub struct LifecycleQuery {
    #[serde(rename = "sendEmail")]
    send_email: Option<bool>,

    #[serde(rename = "tempPassword")]
    temp_password: Option<bool>,
}

/// Deactivate and unlock answer with an empty object.
#[derive(Serialize)]
struct Empty {}

#[endpoint {
    method = POST,
    path = "/api/v1/users/{user_id}/lifecycle/{operation}"
}]
pub async fn lifecycle_operation(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<LifecyclePathParam>,
    query_params: Query<LifecycleQuery>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    apictx.record(&rqctx);
    let LifecyclePathParam { user_id, operation } = path_param.into_inner();
    let query = query_params.into_inner();

    // Okta sends emails unless told not to.
    let send_email = query.send_email.unwrap_or(true);
    let temp_password = query.temp_password.unwrap_or(false);

    apictx.with_store(|store| match operation {
        LifecycleOperation::Activate => store_response(
            StatusCode::OK,
            store.activate(&user_id, send_email),
        ),

        LifecycleOperation::Deactivate => store_response(
            StatusCode::OK,
            store.deactivate(&user_id).map(|()| Empty {}),
        ),

        LifecycleOperation::Unlock => store_response(
            StatusCode::OK,
            store.unlock(&user_id).map(|()| Empty {}),
        ),

        LifecycleOperation::ResetPassword => store_response(
            StatusCode::OK,
            store.reset_password(&user_id, send_email),
        ),

        LifecycleOperation::ExpirePassword => store_response(
            StatusCode::OK,
            store.expire_password(&user_id, temp_password),
        ),
    })
}

#[endpoint {
    method = POST,
    path = "/api/v1/users/{user_id}/credentials/change_password"
}]
pub async fn change_password(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
    body: TypedBody<ChangePasswordRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    apictx.record(&rqctx);
    let user_id = path_param.into_inner().user_id;
    let ChangePasswordRequest { old_password, new_password } =
        body.into_inner();

    store_response(
        StatusCode::OK,
        apictx.with_store(|store| {
            store.change_password(
                &user_id,
                old_password.value.as_deref(),
                new_password.value.as_deref(),
            )
        }),
    )
}
