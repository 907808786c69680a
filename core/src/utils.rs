// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turning response bodies into models.

use super::*;

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum DeserializationError {
    #[error("response body is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("expected a JSON object or array, found {0}")]
    UnexpectedShape(&'static str),

    #[error("expected a single object, found an array of {0} elements")]
    ExpectedObject(usize),

    #[error("JSON object does not fit the model")]
    Object(#[source] serde_json::Error),

    #[error("element {index} of the JSON array does not fit the model")]
    Element {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// The result of deserializing a body that may hold one model or a list of
/// them.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_one(self) -> Result<T, DeserializationError> {
        match self {
            OneOrMany::One(item) => Ok(item),
            OneOrMany::Many(items) => {
                Err(DeserializationError::ExpectedObject(items.len()))
            }
        }
    }

    /// A single object is treated as a list of one.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse `body` as one `T` (top-level object) or an ordered list of `T`
/// (top-level array).
pub fn deserialize<T>(body: &str) -> Result<OneOrMany<T>, DeserializationError>
where
    T: DeserializeOwned,
{
    let value: Value = serde_json::from_str(body)
        .map_err(DeserializationError::InvalidJson)?;

    match value {
        Value::Array(elements) => elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                serde_json::from_value(element).map_err(|source| {
                    DeserializationError::Element { index, source }
                })
            })
            .collect::<Result<Vec<T>, _>>()
            .map(OneOrMany::Many),

        Value::Object(_) => serde_json::from_value(value)
            .map(OneOrMany::One)
            .map_err(DeserializationError::Object),

        other => Err(DeserializationError::UnexpectedShape(shape(&other))),
    }
}

pub fn deserialize_one<T>(body: &str) -> Result<T, DeserializationError>
where
    T: DeserializeOwned,
{
    deserialize(body)?.into_one()
}

pub fn deserialize_many<T>(body: &str) -> Result<Vec<T>, DeserializationError>
where
    T: DeserializeOwned,
{
    Ok(deserialize(body)?.into_vec())
}

/// Skip serializing if an optional string is None or empty
pub fn skip_serializing_empty(value: &Option<String>) -> bool {
    match value {
        None => true,
        Some(v) => v.is_empty(),
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::User;
    use crate::UserGroup;

    #[test]
    fn test_deserialize_array_keeps_order() {
        let body = json!([
            { "id": "00u1", "profile": { "login": "dschrute@dundermifflin.com" } },
            { "id": "00u2", "profile": { "login": "jhalpert@dundermifflin.com" } },
            { "id": "00u3", "profile": { "login": "pbeesly@dundermifflin.com" } },
        ])
        .to_string();

        let users = match deserialize::<User>(&body).unwrap() {
            OneOrMany::Many(users) => users,
            OneOrMany::One(_) => panic!("expected an array"),
        };

        let ids: Vec<_> =
            users.iter().map(|u| u.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["00u1", "00u2", "00u3"]);
    }

    #[test]
    fn test_deserialize_object_is_one() {
        let body = json!({
            "id": "00g1",
            "type": "OKTA_GROUP",
            "profile": { "name": "Sales", "description": "Scranton sales" },
        })
        .to_string();

        let group = deserialize::<UserGroup>(&body).unwrap();
        assert_eq!(group.len(), 1);

        let group = group.into_one().unwrap();
        assert_eq!(group.id.as_deref(), Some("00g1"));
        assert_eq!(group.profile.name.as_deref(), Some("Sales"));
    }

    #[test]
    fn test_deserialize_empty_array() {
        let users = deserialize_many::<User>("[]").unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_deserialize_many_wraps_single_object() {
        let users = deserialize_many::<User>(r#"{"id":"00u1"}"#).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id.as_deref(), Some("00u1"));
    }

    #[test]
    fn test_deserialize_one_rejects_array() {
        let err = deserialize_one::<User>(r#"[{"id":"00u1"},{"id":"00u2"}]"#)
            .unwrap_err();
        assert!(matches!(err, DeserializationError::ExpectedObject(2)));
    }

    #[test]
    fn test_deserialize_unknown_fields_are_kept() {
        let user = deserialize_one::<User>(
            r#"{"id":"00u1","type":{"id":"oty1"},"_links":{"self":{"href":"x"}}}"#,
        )
        .unwrap();

        assert!(user.extra.contains_key("_links"));
        assert!(user.extra.contains_key("type"));
        assert!(user.status.is_none());
    }

    #[test]
    fn test_deserialize_invalid_json() {
        let err = deserialize::<User>("{not json").unwrap_err();
        assert!(matches!(err, DeserializationError::InvalidJson(_)));

        let err = deserialize::<User>("").unwrap_err();
        assert!(matches!(err, DeserializationError::InvalidJson(_)));
    }

    #[test]
    fn test_deserialize_scalar_is_rejected() {
        let err = deserialize::<User>("42").unwrap_err();
        assert!(matches!(err, DeserializationError::UnexpectedShape("a number")));

        let err = deserialize::<User>("null").unwrap_err();
        assert!(matches!(err, DeserializationError::UnexpectedShape("null")));
    }

    #[test]
    fn test_deserialize_bad_element_names_index() {
        let err = deserialize::<User>(r#"[{"id":"00u1"},{"id":7}]"#)
            .unwrap_err();
        assert!(matches!(err, DeserializationError::Element { index: 1, .. }));
    }
}
