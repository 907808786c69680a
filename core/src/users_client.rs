// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use slog::Logger;

/// Client for Okta's `/api/v1/users` endpoints.
///
/// Every method is one blocking request (one per page when paging). User ids
/// are passed through as given: they may be an id or a login, and nothing is
/// validated locally. Errors from the server come back as `Error::Api`.
#[derive(Clone, Debug)]
pub struct UsersClient {
    api: ApiClient,
}

impl UsersClient {
    pub fn new(log: Logger, config: ClientConfig) -> Result<Self, Error> {
        Ok(Self { api: ApiClient::new(log, &config)? })
    }

    pub fn api_client(&self) -> &ApiClient {
        &self.api
    }

    fn fetch_one<T: DeserializeOwned>(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<T, Error> {
        let body = self.api.execute_text(request)?;
        Ok(utils::deserialize_one(&body)?)
    }

    fn fetch_many<T: DeserializeOwned>(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<Vec<T>, Error> {
        let body = self.api.execute_text(request)?;
        Ok(utils::deserialize_many(&body)?)
    }

    // CRUD

    /// List users. Unset parameters are left out of the query.
    pub fn get_users(
        &self,
        params: &ListUsersParams,
    ) -> Result<Vec<User>, Error> {
        self.fetch_many(self.api.request(Method::GET, &[])?.query(params))
    }

    /// Get one user by id or login.
    pub fn get_user(&self, user_id: &str) -> Result<User, Error> {
        self.fetch_one(self.api.request(Method::GET, &[user_id])?)
    }

    /// The groups a user is a member of.
    pub fn get_user_groups(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserGroup>, Error> {
        self.fetch_many(self.api.request(Method::GET, &[user_id, "groups"])?)
    }

    /// The app links assigned to a user, as raw JSON.
    pub fn get_user_apps(
        &self,
        user_id: &str,
    ) -> Result<serde_json::Value, Error> {
        let body = self
            .api
            .execute_text(self.api.request(Method::GET, &[user_id, "appLinks"])?)?;

        serde_json::from_str(&body).map_err(|e| {
            Error::Deserialization(DeserializationError::InvalidJson(e))
        })
    }

    /// Replace a user, addressed by its own id.
    pub fn update_user(&self, user: &User) -> Result<User, Error> {
        let user_id = user.id.as_deref().ok_or(Error::MissingUserId)?;
        self.update_user_by_id(user_id, user)
    }

    /// Update the attributes present on `user`, addressed by its own id.
    pub fn update_user_partially(&self, user: &User) -> Result<User, Error> {
        let user_id = user.id.as_deref().ok_or(Error::MissingUserId)?;
        self.update_user_by_id_partially(user_id, user)
    }

    /// Replace the user `user_id` with `user`.
    pub fn update_user_by_id(
        &self,
        user_id: &str,
        user: &User,
    ) -> Result<User, Error> {
        self.fetch_one(self.api.request(Method::PUT, &[user_id])?.json(user))
    }

    /// Update only the attributes present on `user`.
    pub fn update_user_by_id_partially(
        &self,
        user_id: &str,
        user: &User,
    ) -> Result<User, Error> {
        self.fetch_one(self.api.request(Method::POST, &[user_id])?.json(user))
    }

    /// Create a user.
    ///
    /// With `activate` unset the `activate` parameter is not sent and the
    /// server default applies; `Some(false)` explicitly asks for a staged
    /// user.
    pub fn create_user(
        &self,
        user: &User,
        activate: Option<bool>,
    ) -> Result<User, Error> {
        let mut request = self.api.request(Method::POST, &[])?.json(user);

        if let Some(activate) = activate {
            request = request.query(&ActivateParam { activate });
        }

        self.fetch_one(request)
    }

    /// Delete a user. Okta only deletes deprovisioned users; calling this
    /// on an active user deactivates it instead.
    pub fn delete_user(&self, user_id: &str) -> Result<(), Error> {
        self.api.execute(self.api.request(Method::DELETE, &[user_id])?)?;
        Ok(())
    }

    /// One page of users. A non-empty `params.url` is fetched as is and the
    /// other parameters are ignored.
    pub fn get_paged_users(
        &self,
        params: &PagedUsersParams,
    ) -> Result<PagedResults<User>, Error> {
        let request = match params.continuation_url() {
            Some(url) => self.api.request_url(Method::GET, url),
            None => self.api.request(Method::GET, &[])?.query(params),
        };

        let response = self.api.execute(request)?;
        PagedResults::from_response(self.api.clone(), response)
    }

    // LIFECYCLE

    fn lifecycle(
        &self,
        user_id: &str,
        operation: &str,
    ) -> Result<reqwest::blocking::RequestBuilder, Error> {
        self.api.request(Method::POST, &[user_id, "lifecycle", operation])
    }

    /// Activate a user. When `send_email` is false the response carries the
    /// activation URL and token instead.
    pub fn activate_user(
        &self,
        user_id: &str,
        send_email: bool,
    ) -> Result<ActivationResponse, Error> {
        self.fetch_one(
            self.lifecycle(user_id, "activate")?
                .query(&SendEmailParam { send_email }),
        )
    }

    /// Deactivate a user. Okta answers with an empty object.
    pub fn deactivate_user(&self, user_id: &str) -> Result<User, Error> {
        self.fetch_one(self.lifecycle(user_id, "deactivate")?)
    }

    /// Unlock a LOCKED_OUT user. Okta answers with an empty object.
    pub fn unlock_user(&self, user_id: &str) -> Result<User, Error> {
        self.fetch_one(self.lifecycle(user_id, "unlock")?)
    }

    /// Start a password reset. When `send_email` is false the response
    /// carries the reset URL instead.
    pub fn reset_password(
        &self,
        user_id: &str,
        send_email: bool,
    ) -> Result<ResetPasswordToken, Error> {
        self.fetch_one(
            self.lifecycle(user_id, "reset_password")?
                .query(&SendEmailParam { send_email }),
        )
    }

    pub fn change_password(
        &self,
        user_id: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<LoginCredentials, Error> {
        let body = ChangePasswordRequest::new(old_password, new_password);

        self.fetch_one(
            self.api
                .request(
                    Method::POST,
                    &[user_id, "credentials", "change_password"],
                )?
                .json(&body),
        )
    }

    /// Expire a user's password.
    ///
    /// Without `temp_password` the response is discarded and
    /// `ExpiredPassword::Expired` is returned. With it, `tempPassword=true`
    /// is sent and the issued temporary password is returned.
    pub fn expire_password(
        &self,
        user_id: &str,
        temp_password: bool,
    ) -> Result<ExpiredPassword, Error> {
        let request = self.lifecycle(user_id, "expire_password")?;

        if !temp_password {
            self.api.execute(request)?;
            return Ok(ExpiredPassword::Expired);
        }

        let temp = self.fetch_one(
            request.query(&TempPasswordParam { temp_password }),
        )?;

        Ok(ExpiredPassword::TempPassword(temp))
    }
}
