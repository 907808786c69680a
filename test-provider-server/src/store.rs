// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use std::collections::BTreeMap;

use chrono::Utc;
use iddqd::IdOrdItem;
use iddqd::IdOrdMap;
use iddqd::id_upcast;
use okta_users::ActivationResponse;
use okta_users::AuthenticationProvider;
use okta_users::GroupProfile;
use okta_users::LoginCredentials;
use okta_users::PasswordCredential;
use okta_users::ResetPasswordToken;
use okta_users::TempPassword;
use okta_users::UserGroup;
use unicase::UniCase;
use uuid::Uuid;

/// Okta's page size when `limit` is not given
const DEFAULT_LIMIT: usize = 200;

/// An error the store wants rendered as an Okta error response.
#[derive(Debug)]
pub struct StoreError {
    pub status: StatusCode,
    pub error: ApiError,
}

impl StoreError {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    pub fn not_found(user_id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ApiError::new(
                "E0000007",
                format!("Not found: Resource not found: {user_id} (User)"),
            ),
        )
    }

    pub fn validation(cause: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError::new("E0000001", "Api validation failed: login")
                .with_cause(cause),
        )
    }

    pub fn invalid_search(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError::new("E0000031", "Invalid search criteria.")
                .with_cause(detail),
        )
    }

    pub fn activation_failed(cause: impl Into<String>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            ApiError::new("E0000016", "Activation failed because the user is already active")
                .with_cause(cause),
        )
    }

    pub fn operation_not_allowed(summary: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, ApiError::new("E0000038", summary))
    }

    pub fn credentials_update_failed(cause: impl Into<String>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            ApiError::new("E0000014", "Update of credentials failed")
                .with_cause(cause),
        )
    }
}

/// A user as the store keeps it: the public resource plus the state Okta
/// never hands back.
#[derive(Clone, Debug)]
pub struct StoredUser {
    pub id: String,
    pub user: User,
    pub password: Option<String>,
    pub app_links: Vec<serde_json::Value>,
}

impl IdOrdItem for StoredUser {
    type Key<'a> = &'a str;

    fn key(&self) -> Self::Key<'_> {
        &self.id
    }

    id_upcast!();
}

impl StoredUser {
    fn status(&self) -> UserStatus {
        self.user.status.clone().unwrap_or(UserStatus::Staged)
    }

    fn set_status(&mut self, status: UserStatus) {
        let now = Utc::now();

        if status == UserStatus::Active && self.user.activated.is_none() {
            self.user.activated = Some(now);
        }

        self.user.status = Some(status);
        self.user.status_changed = Some(now);
        self.user.last_updated = Some(now);
    }

    fn set_password(&mut self, password: String) {
        let now = Utc::now();
        self.password = Some(password);
        self.user.password_changed = Some(now);
        self.user.last_updated = Some(now);
    }
}

/// Query accepted by `GET /api/v1/users`
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default)]
pub struct ListUsersQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// A page of users, and the query for the page after it if there is one.
pub struct UserPage {
    pub users: Vec<User>,
    pub next: Option<ListUsersQuery>,
}

/// What `expire_password` answers with: the user, or just the temporary
/// password when one was asked for.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum ExpiredPasswordResponse {
    User(User),
    TempPassword(TempPassword),
}

/// One `<attribute> eq "<value>"` clause of a filter or search expression.
#[derive(Debug, PartialEq)]
struct Clause {
    pointer: String,
    value: String,
}

/// Parse `status eq "ACTIVE" and profile.lastName eq "Halpert"`.
fn parse_expression(expression: &str) -> Result<Vec<Clause>, StoreError> {
    expression
        .split(" and ")
        .map(|clause| {
            let (attribute, value) =
                clause.trim().split_once(" eq ").ok_or_else(|| {
                    StoreError::invalid_search(format!(
                        "unsupported clause: {clause}"
                    ))
                })?;

            let value = value
                .trim()
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .ok_or_else(|| {
                    StoreError::invalid_search(format!(
                        "value in {clause} is not quoted"
                    ))
                })?;

            let attribute = attribute.trim();
            let supported = attribute == "id"
                || attribute == "status"
                || attribute.starts_with("profile.");

            if !supported {
                return Err(StoreError::invalid_search(format!(
                    "unsupported attribute: {attribute}"
                )));
            }

            Ok(Clause {
                pointer: format!("/{}", attribute.replace('.', "/")),
                value: value.to_string(),
            })
        })
        .collect()
}

fn matches_clauses(user: &serde_json::Value, clauses: &[Clause]) -> bool {
    clauses.iter().all(|clause| {
        user.pointer(&clause.pointer).and_then(|v| v.as_str())
            == Some(clause.value.as_str())
    })
}

/// `q` is a case insensitive prefix match on names and email.
fn matches_q(user: &User, q: &str) -> bool {
    let q = q.to_lowercase();
    let profile = &user.profile;

    [&profile.first_name, &profile.last_name, &profile.email, &profile.login]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().starts_with(&q))
}

/// Users and groups, keyed by id.
pub struct Store {
    users: IdOrdMap<StoredUser>,
    groups: BTreeMap<String, UserGroup>,
    memberships: BTreeMap<String, Vec<String>>,
    everyone: String,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        let mut store = Self {
            users: IdOrdMap::new(),
            groups: BTreeMap::new(),
            memberships: BTreeMap::new(),
            everyone: String::new(),
        };

        // Okta puts every user in the built in Everyone group.
        store.everyone = store.create_group("Everyone", "BUILT_IN");
        store
    }

    /// Create a group and return its id
    pub fn create_group(&mut self, name: &str, group_type: &str) -> String {
        let id = format!("00g{}", Uuid::new_v4().simple());
        let now = Utc::now();

        let group = UserGroup {
            id: Some(id.clone()),
            created: Some(now),
            last_updated: Some(now),
            last_membership_updated: Some(now),
            object_class: vec![String::from("okta:user_group")],
            group_type: Some(group_type.to_string()),
            profile: GroupProfile {
                name: Some(name.to_string()),
                description: None,
                extra: Default::default(),
            },
            extra: Default::default(),
        };

        self.groups.insert(id.clone(), group);
        id
    }

    pub fn add_member(
        &mut self,
        group_id: &str,
        user_id: &str,
    ) -> Result<(), StoreError> {
        let user_id = self.resolve(user_id)?;

        let members = self.memberships.entry(group_id.to_string()).or_default();
        if !members.contains(&user_id) {
            members.push(user_id);
        }

        if let Some(group) = self.groups.get_mut(group_id) {
            group.last_membership_updated = Some(Utc::now());
        }

        Ok(())
    }

    pub fn add_app_link(
        &mut self,
        user_id: &str,
        link: serde_json::Value,
    ) -> Result<(), StoreError> {
        self.get_mut(user_id)?.app_links.push(link);
        Ok(())
    }

    /// Force a status, e.g. LOCKED_OUT, which only sign-in attempts
    /// would otherwise produce.
    pub fn set_status(
        &mut self,
        user_id: &str,
        status: UserStatus,
    ) -> Result<(), StoreError> {
        self.get_mut(user_id)?.set_status(status);
        Ok(())
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Map an id or login to the id.
    fn resolve(&self, user_id: &str) -> Result<String, StoreError> {
        if self.users.get(user_id).is_some() {
            return Ok(user_id.to_string());
        }

        let login = UniCase::new(user_id);

        self.users
            .iter()
            .find(|u| u.user.login().is_some_and(|l| UniCase::new(l) == login))
            .map(|u| u.id.clone())
            .ok_or_else(|| StoreError::not_found(user_id))
    }

    fn get(&self, user_id: &str) -> Result<&StoredUser, StoreError> {
        let id = self.resolve(user_id)?;
        self.users.get(id.as_str()).ok_or_else(|| StoreError::not_found(user_id))
    }

    fn get_mut(
        &mut self,
        user_id: &str,
    ) -> Result<iddqd::id_ord_map::RefMut<'_, StoredUser>, StoreError> {
        let id = self.resolve(user_id)?;
        self.users
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::not_found(user_id))
    }

    fn login_taken(&self, login: &str, except: Option<&str>) -> bool {
        let login = UniCase::new(login);

        self.users.iter().any(|u| {
            Some(u.id.as_str()) != except
                && u.user.login().is_some_and(|l| UniCase::new(l) == login)
        })
    }

    pub fn get_user(&self, user_id: &str) -> Result<User, StoreError> {
        Ok(self.get(user_id)?.user.clone())
    }

    pub fn list_users(
        &self,
        query: &ListUsersQuery,
    ) -> Result<UserPage, StoreError> {
        let filter = query
            .filter
            .as_deref()
            .map(parse_expression)
            .transpose()?
            .unwrap_or_default();
        let search = query
            .search
            .as_deref()
            .map(parse_expression)
            .transpose()?
            .unwrap_or_default();

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

        let mut matching = self
            .users
            .iter()
            .filter(|u| match &query.after {
                Some(after) => u.id.as_str() > after.as_str(),
                None => true,
            })
            .filter(|u| match &query.q {
                Some(q) => matches_q(&u.user, q),
                None => true,
            })
            .filter(|u| {
                let json = serde_json::to_value(&u.user).unwrap_or_default();
                matches_clauses(&json, &filter) && matches_clauses(&json, &search)
            })
            .map(|u| u.user.clone());

        let users: Vec<User> = matching.by_ref().take(limit).collect();
        let more = matching.next().is_some();

        let next = match (more, users.last()) {
            (true, Some(last)) => Some(ListUsersQuery {
                after: last.id.clone(),
                ..query.clone()
            }),
            _ => None,
        };

        Ok(UserPage { users, next })
    }

    /// Okta activates new users unless told otherwise. Without a password an
    /// activated user waits in PROVISIONED for the activation email.
    pub fn create_user(
        &mut self,
        user: User,
        activate: Option<bool>,
    ) -> Result<User, StoreError> {
        let Some(login) = user.login() else {
            return Err(StoreError::validation(
                "login: The field cannot be left blank",
            ));
        };

        if self.login_taken(login, None) {
            return Err(StoreError::validation(
                "login: An object with this field already exists in the current organization",
            ));
        }

        let id = format!("00u{}", Uuid::new_v4().simple());
        let now = Utc::now();

        let password = user
            .credentials
            .as_ref()
            .and_then(|c| c.password.as_ref())
            .and_then(|p| p.value.clone());

        let mut stored = StoredUser {
            id: id.clone(),
            user: User {
                id: Some(id.clone()),
                created: Some(now),
                last_updated: Some(now),
                profile: user.profile,
                credentials: Some(LoginCredentials {
                    password: password
                        .as_ref()
                        .map(|_| PasswordCredential::default()),
                    recovery_question: user
                        .credentials
                        .and_then(|c| c.recovery_question)
                        .map(|mut q| {
                            q.answer = None;
                            q
                        }),
                    provider: Some(AuthenticationProvider {
                        provider_type: Some(String::from("OKTA")),
                        name: Some(String::from("OKTA")),
                    }),
                    extra: Default::default(),
                }),
                ..Default::default()
            },
            password: None,
            app_links: vec![],
        };

        if let Some(password) = password {
            stored.set_password(password);
        }

        let status = match activate.unwrap_or(true) {
            true if stored.password.is_some() => UserStatus::Active,
            true => UserStatus::Provisioned,
            false => UserStatus::Staged,
        };
        stored.set_status(status);

        let user = stored.user.clone();

        self.users.insert_unique(stored).map_err(|_| {
            StoreError::validation("id: generated id collided")
        })?;
        self.memberships.entry(self.everyone.clone()).or_default().push(id);

        Ok(user)
    }

    /// PUT: the submitted profile replaces the stored one.
    pub fn replace_user(
        &mut self,
        user_id: &str,
        user: User,
    ) -> Result<User, StoreError> {
        let id = self.resolve(user_id)?;

        let Some(login) = user.login() else {
            return Err(StoreError::validation(
                "login: The field cannot be left blank",
            ));
        };

        if self.login_taken(login, Some(&id)) {
            return Err(StoreError::validation(
                "login: An object with this field already exists in the current organization",
            ));
        }

        let mut stored = self.get_mut(&id)?;
        stored.user.profile = user.profile;
        stored.user.last_updated = Some(Utc::now());

        if let Some(password) = submitted_password(&user.credentials) {
            stored.set_password(password);
        }

        Ok(stored.user.clone())
    }

    /// POST: only the submitted profile attributes change.
    pub fn update_user(
        &mut self,
        user_id: &str,
        user: User,
    ) -> Result<User, StoreError> {
        let id = self.resolve(user_id)?;

        if let Some(login) = user.login() {
            if self.login_taken(login, Some(&id)) {
                return Err(StoreError::validation(
                    "login: An object with this field already exists in the current organization",
                ));
            }
        }

        let mut stored = self.get_mut(&id)?;
        let profile = &mut stored.user.profile;
        let update = user.profile;

        for (field, value) in [
            (&mut profile.login, update.login),
            (&mut profile.email, update.email),
            (&mut profile.second_email, update.second_email),
            (&mut profile.first_name, update.first_name),
            (&mut profile.last_name, update.last_name),
            (&mut profile.mobile_phone, update.mobile_phone),
        ] {
            if value.is_some() {
                *field = value;
            }
        }
        profile.extra.extend(update.extra);
        stored.user.last_updated = Some(Utc::now());

        if let Some(password) = submitted_password(&user.credentials) {
            stored.set_password(password);
        }

        Ok(stored.user.clone())
    }

    /// Okta deletes in two steps: the first call on a user that is not
    /// DEPROVISIONED deactivates it, the second removes it.
    pub fn delete_user(&mut self, user_id: &str) -> Result<(), StoreError> {
        let id = self.resolve(user_id)?;

        if self.get(&id)?.status() != UserStatus::Deprovisioned {
            self.get_mut(&id)?.set_status(UserStatus::Deprovisioned);
            return Ok(());
        }

        self.users.remove(id.as_str());
        for members in self.memberships.values_mut() {
            members.retain(|member| *member != id);
        }

        Ok(())
    }

    pub fn user_groups(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserGroup>, StoreError> {
        let id = self.resolve(user_id)?;

        Ok(self
            .groups
            .iter()
            .filter(|(group_id, _)| {
                self.memberships
                    .get(*group_id)
                    .is_some_and(|members| members.contains(&id))
            })
            .map(|(_, group)| group.clone())
            .collect())
    }

    pub fn app_links(
        &self,
        user_id: &str,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        Ok(self.get(user_id)?.app_links.clone())
    }

    pub fn activate(
        &mut self,
        user_id: &str,
        send_email: bool,
    ) -> Result<ActivationResponse, StoreError> {
        let mut stored = self.get_mut(user_id)?;

        // Only STAGED and DEPROVISIONED users can be activated; PROVISIONED
        // ones are waiting on their activation email already.
        if !matches!(
            stored.status(),
            UserStatus::Staged | UserStatus::Deprovisioned
        ) {
            return Err(StoreError::activation_failed(format!(
                "user is {}",
                stored.status()
            )));
        }

        let status = match stored.password {
            Some(_) => UserStatus::Active,
            None => UserStatus::Provisioned,
        };
        stored.set_status(status);

        if send_email {
            return Ok(ActivationResponse::default());
        }

        let token = Uuid::new_v4().simple().to_string();
        Ok(ActivationResponse {
            activation_url: Some(format!(
                "https://example.okta.com/welcome/{token}"
            )),
            activation_token: Some(token),
            extra: Default::default(),
        })
    }

    pub fn deactivate(&mut self, user_id: &str) -> Result<(), StoreError> {
        self.get_mut(user_id)?.set_status(UserStatus::Deprovisioned);
        Ok(())
    }

    pub fn unlock(&mut self, user_id: &str) -> Result<(), StoreError> {
        let mut stored = self.get_mut(user_id)?;

        if stored.status() != UserStatus::LockedOut {
            return Err(StoreError::operation_not_allowed(
                "Unlock is not allowed for this user.",
            ));
        }

        stored.set_status(UserStatus::Active);
        Ok(())
    }

    pub fn reset_password(
        &mut self,
        user_id: &str,
        send_email: bool,
    ) -> Result<ResetPasswordToken, StoreError> {
        let mut stored = self.get_mut(user_id)?;

        if matches!(
            stored.status(),
            UserStatus::Staged | UserStatus::Deprovisioned
        ) {
            return Err(StoreError::operation_not_allowed(format!(
                "Reset password is not allowed for a {} user.",
                stored.status()
            )));
        }

        stored.set_status(UserStatus::Recovery);

        if send_email {
            return Ok(ResetPasswordToken::default());
        }

        Ok(ResetPasswordToken {
            reset_password_url: Some(format!(
                "https://example.okta.com/reset_password/{}",
                Uuid::new_v4().simple()
            )),
            extra: Default::default(),
        })
    }

    /// Expire the password; with `temp_password` also replace it with a
    /// generated one and hand that back.
    pub fn expire_password(
        &mut self,
        user_id: &str,
        temp_password: bool,
    ) -> Result<ExpiredPasswordResponse, StoreError> {
        let mut stored = self.get_mut(user_id)?;
        stored.set_status(UserStatus::PasswordExpired);

        if !temp_password {
            return Ok(ExpiredPasswordResponse::User(stored.user.clone()));
        }

        let temp = Uuid::new_v4().simple().to_string()[..8].to_string();
        stored.set_password(temp.clone());

        Ok(ExpiredPasswordResponse::TempPassword(TempPassword {
            temp_password: Some(temp),
            extra: Default::default(),
        }))
    }

    pub fn change_password(
        &mut self,
        user_id: &str,
        old_password: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<LoginCredentials, StoreError> {
        let mut stored = self.get_mut(user_id)?;

        if stored.password.as_deref() != old_password || old_password.is_none()
        {
            return Err(StoreError::credentials_update_failed(
                "oldPassword: The credentials provided were incorrect.",
            ));
        }

        let new_password = match new_password {
            Some(p) if !p.is_empty() => p,
            _ => {
                return Err(StoreError::credentials_update_failed(
                    "newPassword: The field cannot be left blank",
                ));
            }
        };

        if Some(new_password) == old_password {
            return Err(StoreError::credentials_update_failed(
                "password: Password cannot be your current password",
            ));
        }

        stored.set_password(new_password.to_string());
        if stored.status() == UserStatus::PasswordExpired {
            stored.set_status(UserStatus::Active);
        }

        Ok(stored.user.credentials.clone().unwrap_or_default())
    }
}

fn submitted_password(credentials: &Option<LoginCredentials>) -> Option<String> {
    credentials
        .as_ref()
        .and_then(|c| c.password.as_ref())
        .and_then(|p| p.value.clone())
}

#[cfg(test)]
mod test {
    use super::*;

    fn dwight() -> User {
        User::new(
            "dschrute@dundermifflin.com",
            "dschrute@dundermifflin.com",
            "Dwight",
            "Schrute",
        )
    }

    #[test]
    fn test_parse_expression() {
        let clauses =
            parse_expression(r#"status eq "ACTIVE" and profile.lastName eq "Halpert""#)
                .unwrap();

        assert_eq!(
            clauses,
            vec![
                Clause {
                    pointer: String::from("/status"),
                    value: String::from("ACTIVE"),
                },
                Clause {
                    pointer: String::from("/profile/lastName"),
                    value: String::from("Halpert"),
                },
            ]
        );

        assert!(parse_expression(r#"lastUpdated gt "2013-06-01""#).is_err());
        assert!(parse_expression("status eq ACTIVE").is_err());
        assert!(parse_expression(r#"created eq "x""#).is_err());
    }

    #[test]
    fn test_create_user_status() {
        let mut store = Store::new();

        let staged = store.create_user(dwight(), Some(false)).unwrap();
        assert_eq!(staged.status, Some(UserStatus::Staged));

        let mut jim = dwight();
        jim.profile.login = Some(String::from("jhalpert@dundermifflin.com"));
        let provisioned = store.create_user(jim, None).unwrap();
        assert_eq!(provisioned.status, Some(UserStatus::Provisioned));

        let mut pam = dwight().with_password("Beesly1!");
        pam.profile.login = Some(String::from("pbeesly@dundermifflin.com"));
        let active = store.create_user(pam, Some(true)).unwrap();
        assert_eq!(active.status, Some(UserStatus::Active));

        // the password value is never handed back
        assert_eq!(
            active.credentials.unwrap().password,
            Some(PasswordCredential::default())
        );
    }

    #[test]
    fn test_duplicate_login_is_case_insensitive() {
        let mut store = Store::new();
        store.create_user(dwight(), None).unwrap();

        let mut shouting = dwight();
        shouting.profile.login = Some(String::from("DSCHRUTE@dundermifflin.com"));

        let err = store.create_user(shouting, None).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.error_code, "E0000001");
    }

    #[test]
    fn test_lookup_by_login() {
        let mut store = Store::new();
        let created = store.create_user(dwight(), None).unwrap();

        let found = store.get_user("DSchrute@DunderMifflin.com").unwrap();
        assert_eq!(found.id, created.id);

        assert_eq!(
            store.get_user("nobody").unwrap_err().error.error_code,
            "E0000007"
        );
    }

    #[test]
    fn test_list_pages_by_id() {
        let mut store = Store::new();
        for i in 0..5 {
            let mut user = dwight();
            user.profile.login = Some(format!("user{i}@dundermifflin.com"));
            store.create_user(user, None).unwrap();
        }

        let mut seen = vec![];
        let mut query = ListUsersQuery { limit: Some(2), ..Default::default() };

        loop {
            let page = store.list_users(&query).unwrap();
            assert!(page.users.len() <= 2);
            seen.extend(page.users.into_iter().map(|u| u.id.unwrap()));

            match page.next {
                Some(next) => query = next,
                None => break,
            }
        }

        let mut sorted = seen.clone();
        sorted.sort();
        assert_eq!(seen.len(), 5);
        assert_eq!(seen, sorted);
    }

    #[test]
    fn test_delete_is_two_step() {
        let mut store = Store::new();
        let id = store.create_user(dwight(), None).unwrap().id.unwrap();

        store.delete_user(&id).unwrap();
        assert_eq!(
            store.get_user(&id).unwrap().status,
            Some(UserStatus::Deprovisioned)
        );

        store.delete_user(&id).unwrap();
        assert!(store.get_user(&id).is_err());
        assert_eq!(store.user_count(), 0);
    }

    #[test]
    fn test_change_password() {
        let mut store = Store::new();
        let id = store
            .create_user(dwight().with_password("Bears1!"), None)
            .unwrap()
            .id
            .unwrap();

        let err = store
            .change_password(&id, Some("Beets1!"), Some("Battlestar1!"))
            .unwrap_err();
        assert_eq!(err.error.error_code, "E0000014");

        store
            .change_password(&id, Some("Bears1!"), Some("Battlestar1!"))
            .unwrap();
        assert_eq!(
            store.get(&id).unwrap().password.as_deref(),
            Some("Battlestar1!")
        );
    }
}
