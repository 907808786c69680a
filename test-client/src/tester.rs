// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::Context;
use anyhow::bail;
use okta_users::ClientConfig;
use okta_users::Error;
use okta_users::ExpiredPassword;
use okta_users::ListUsersParams;
use okta_users::PagedUsersParams;
use okta_users::StatusCode;
use okta_users::User;
use okta_users::UserStatus;
use okta_users::UsersClient;
use slog::Logger;
use slog::info;
use uuid::Uuid;

/// Drives a `UsersClient` through the Users API and checks that each call
/// comes back the way Okta documents it.
pub struct Tester {
    log: Logger,
    client: UsersClient,
    /// Keeps logins unique across runs against the same org
    run_id: String,
}

impl Tester {
    pub fn new(log: Logger, config: ClientConfig) -> anyhow::Result<Self> {
        let client = UsersClient::new(log.clone(), config)
            .context("building users client")?;

        let run_id = Uuid::new_v4().simple().to_string()[..8].to_string();

        Ok(Self { log, client, run_id })
    }

    pub fn run(&self) -> anyhow::Result<()> {
        self.nonexistent_user_tests()
            .context("nonexistent_user_tests")?;

        let dwight = self.create_user_tests().context("create_user_tests")?;
        let jim = self.create_jim_user().context("create_jim_user")?;

        self.list_users_test(&dwight, &jim).context("list_users_test")?;
        self.paged_users_test(&dwight, &jim).context("paged_users_test")?;
        self.update_user_tests(&dwight).context("update_user_tests")?;
        self.group_and_app_tests(&dwight).context("group_and_app_tests")?;
        self.lifecycle_tests(&dwight).context("lifecycle_tests")?;
        self.password_tests(&jim).context("password_tests")?;

        self.delete_user(&dwight).context("delete dwight")?;
        self.delete_user(&jim).context("delete jim")?;

        Ok(())
    }

    fn login(&self, name: &str) -> String {
        format!("{name}+{}@dundermifflin.com", self.run_id)
    }

    fn user_id(user: &User) -> anyhow::Result<&str> {
        match user.id.as_deref() {
            Some(id) => Ok(id),
            None => bail!("user has no id"),
        }
    }

    fn expect_status<T: std::fmt::Debug>(
        result: Result<T, Error>,
        expected: StatusCode,
    ) -> anyhow::Result<()> {
        match result {
            Err(error) if error.status() == Some(expected) => Ok(()),
            Err(error) => bail!("expected {expected}, got error {error}"),
            Ok(value) => bail!("expected {expected}, got {value:?}"),
        }
    }

    fn nonexistent_user_tests(&self) -> anyhow::Result<()> {
        let random_id = "00u999999999999999999";

        // A GET of a nonexistent user = 404
        Self::expect_status(
            self.client.get_user(random_id),
            StatusCode::NOT_FOUND,
        )?;

        // as is a DELETE
        Self::expect_status(
            self.client.delete_user(random_id),
            StatusCode::NOT_FOUND,
        )?;

        // and any lifecycle operation
        Self::expect_status(
            self.client.deactivate_user(random_id),
            StatusCode::NOT_FOUND,
        )?;

        Ok(())
    }

    fn create_user_tests(&self) -> anyhow::Result<User> {
        let login = self.login("dschrute");
        let body = User::new(&login, &login, "Dwight", "Schrute");

        // Explicitly not activated: the user stays STAGED
        let user = self.client.create_user(&body, Some(false))?;

        if user.status != Some(UserStatus::Staged) {
            bail!("created user has status {:?}, not STAGED", user.status);
        }

        if user.login() != Some(login.as_str()) {
            bail!("login of test user is {:?}, not {login}", user.login());
        }

        let id = Self::user_id(&user)?;

        // By id and by login
        let by_id = self.client.get_user(id)?;
        let by_login = self.client.get_user(&login)?;

        if by_id.id != user.id || by_login.id != user.id {
            bail!("looking up {id} by id and login returned different users");
        }

        // Logins are unique
        Self::expect_status(
            self.client.create_user(&body, None),
            StatusCode::BAD_REQUEST,
        )?;

        info!(self.log, "created user"; "id" => id);

        Ok(user)
    }

    fn create_jim_user(&self) -> anyhow::Result<User> {
        let login = self.login("jhalpert");
        let body = User::new(&login, &login, "Jim", "Halpert")
            .with_password("Pr4nk-Dw1ght!");

        // Activation left to the server default, which activates
        let user = self.client.create_user(&body, None)?;

        if user.status != Some(UserStatus::Active) {
            bail!("created user has status {:?}, not ACTIVE", user.status);
        }

        Ok(user)
    }

    fn list_users_test(&self, dwight: &User, jim: &User) -> anyhow::Result<()> {
        let params = ListUsersParams {
            q: Some(self.login("")),
            ..Default::default()
        };
        let users = self.client.get_users(&params)?;

        // q matches on a prefix, so neither test user matches their shared
        // suffix alone
        if !users.is_empty() {
            bail!("q={:?} matched {} users", params.q, users.len());
        }

        let params = ListUsersParams {
            q: Some(String::from("jhalpert+")),
            ..Default::default()
        };
        let users = self.client.get_users(&params)?;

        if !users.iter().any(|u| u.id == jim.id) {
            bail!("q=jhalpert+ did not find jim");
        }

        let filter = format!(
            "profile.login eq \"{}\"",
            dwight.login().unwrap_or_default()
        );
        let params =
            ListUsersParams { filter: Some(filter), ..Default::default() };
        let users = self.client.get_users(&params)?;

        if users.len() != 1 || users[0].id != dwight.id {
            bail!("filtering on dwight's login returned {} users", users.len());
        }

        Ok(())
    }

    fn paged_users_test(&self, dwight: &User, jim: &User) -> anyhow::Result<()> {
        let params = PagedUsersParams { limit: Some(1), ..Default::default() };
        let mut page = self.client.get_paged_users(&params)?;

        let mut seen = vec![];
        loop {
            if page.results().len() > 1 {
                bail!("page of limit 1 held {} users", page.results().len());
            }

            seen.extend(page.results().iter().map(|u| u.id.clone()));

            if page.is_last_page() {
                break;
            }

            page.next_page()?;
        }

        for user in [dwight, jim] {
            if !seen.contains(&user.id) {
                bail!("paging did not return {:?}", user.id);
            }
        }

        if !matches!(page.next_page(), Err(Error::NoNextPage)) {
            bail!("next_page past the last page did not fail");
        }

        Ok(())
    }

    fn update_user_tests(&self, dwight: &User) -> anyhow::Result<()> {
        let id = Self::user_id(dwight)?;

        // Partial: only the mobile phone changes
        let mut partial = User::default();
        partial.profile.mobile_phone = Some(String::from("570-555-0100"));

        let updated = self.client.update_user_by_id_partially(id, &partial)?;

        if updated.profile.mobile_phone.as_deref() != Some("570-555-0100") {
            bail!("partial update did not set mobile phone");
        }

        if updated.profile.last_name.as_deref() != Some("Schrute") {
            bail!("partial update changed last name");
        }

        // Full: the profile is replaced
        let mut full = updated.clone();
        full.profile.mobile_phone = None;
        full.profile.first_name = Some(String::from("Assistant Regional"));

        let replaced = self.client.update_user(&full)?;

        if replaced.profile.mobile_phone.is_some() {
            bail!("full update kept mobile phone");
        }

        if replaced.profile.first_name.as_deref() != Some("Assistant Regional")
        {
            bail!("full update did not set first name");
        }

        Ok(())
    }

    fn group_and_app_tests(&self, dwight: &User) -> anyhow::Result<()> {
        let id = Self::user_id(dwight)?;

        let groups = self.client.get_user_groups(id)?;

        if !groups
            .iter()
            .any(|g| g.profile.name.as_deref() == Some("Everyone"))
        {
            bail!("user is not in the Everyone group");
        }

        let apps = self.client.get_user_apps(id)?;

        if !apps.is_array() {
            bail!("app links are not a JSON array: {apps}");
        }

        Ok(())
    }

    fn lifecycle_tests(&self, dwight: &User) -> anyhow::Result<()> {
        let id = Self::user_id(dwight)?;

        let activation = self.client.activate_user(id, false)?;

        if activation.activation_token.is_none() {
            bail!("activate without email returned no activation token");
        }

        // Already active now
        Self::expect_status(
            self.client.activate_user(id, false),
            StatusCode::FORBIDDEN,
        )?;

        // Dwight is not locked out
        Self::expect_status(
            self.client.unlock_user(id),
            StatusCode::FORBIDDEN,
        )?;

        let reset = self.client.reset_password(id, false)?;

        if reset.reset_password_url.is_none() {
            bail!("reset without email returned no reset url");
        }

        self.client.deactivate_user(id)?;

        let user = self.client.get_user(id)?;
        if user.status != Some(UserStatus::Deprovisioned) {
            bail!("deactivated user has status {:?}", user.status);
        }

        Ok(())
    }

    fn password_tests(&self, jim: &User) -> anyhow::Result<()> {
        let id = Self::user_id(jim)?;

        let ExpiredPassword::TempPassword(temp) =
            self.client.expire_password(id, true)?
        else {
            bail!("expire_password(true) returned no temp password");
        };

        let Some(temp) = temp.temp_password else {
            bail!("temp password response was empty");
        };

        Self::expect_status(
            self.client.change_password(id, "not-the-password", "Sn1ps-Sn4ps!"),
            StatusCode::FORBIDDEN,
        )?;

        self.client.change_password(id, &temp, "Sn1ps-Sn4ps!")?;

        let expired = self.client.expire_password(id, false)?;
        if expired != ExpiredPassword::Expired {
            bail!("expire_password(false) returned {expired:?}");
        }

        let user = self.client.get_user(id)?;
        if user.status != Some(UserStatus::PasswordExpired) {
            bail!("expired user has status {:?}", user.status);
        }

        Ok(())
    }

    /// Deleting a user that is not DEPROVISIONED only deactivates it, so
    /// that takes a second call.
    fn delete_user(&self, user: &User) -> anyhow::Result<()> {
        let id = Self::user_id(user)?;

        self.client.delete_user(id)?;
        if self.client.get_user(id).is_ok() {
            self.client.delete_user(id)?;
        }

        Self::expect_status(self.client.get_user(id), StatusCode::NOT_FOUND)
    }
}
