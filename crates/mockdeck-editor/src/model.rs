//! Requests, mocks and scenarios as seen by the editor.
//!
//! These types mirror the JSON shapes exchanged with the scenario store, so
//! field names serialize in camelCase.

use crate::headers::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identity of a scenario.
    ScenarioId
);
string_id!(
    /// Stable identity of a saved mock.
    MockId
);
string_id!(
    /// Identity of an intercepted request.
    RequestId
);

/// The response half of an intercepted exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedResponse {
    #[serde(deserialize_with = "lenient::number")]
    pub status: u16,
    /// Delay in milliseconds.
    #[serde(default, deserialize_with = "lenient::number_or_default")]
    pub delay: u64,
    #[serde(default)]
    pub headers: HeaderMap,
    #[serde(default)]
    pub body: String,
}

/// A live, intercepted HTTP exchange. Read-only to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    pub url: String,
    pub method: String,
    /// Request parameters, passed through to created mocks untouched.
    #[serde(default)]
    pub params: serde_json::Value,
    /// Request headers as sent by the client.
    #[serde(default)]
    pub headers: HeaderMap,
    pub response: ObservedResponse,
}

/// Response fields stored on a mock. Any of them may be missing on mocks
/// written by other tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockResponse {
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<u16>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub delay: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// A previously saved response override for a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mock {
    pub id: MockId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
    #[serde(default)]
    pub response: MockResponse,
}

fn default_active() -> bool {
    true
}

impl Mock {
    /// Materialize a mock from a create payload under a freshly assigned id.
    pub fn from_new(id: MockId, new: NewMock) -> Self {
        Self {
            id,
            request_id: Some(new.request_id),
            active: new.active,
            url: Some(new.url),
            method: Some(new.method),
            headers: Some(new.headers),
            params: new.params,
            response: new.response.into(),
        }
    }

    /// Apply an update patch in place.
    pub fn apply_patch(&mut self, patch: MockPatch) {
        self.url = Some(patch.url);
        self.headers = Some(patch.headers);
        self.response = patch.response.into();
    }
}

/// A named, ordered collection of mocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: ScenarioId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub mocked_requests: Vec<Mock>,
}

impl Scenario {
    pub fn new(id: impl Into<ScenarioId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            mocked_requests: Vec::new(),
        }
    }

    pub fn contains(&self, mock_id: &MockId) -> bool {
        self.mocked_requests.iter().any(|m| &m.id == mock_id)
    }

    pub fn find(&self, mock_id: &MockId) -> Option<&Mock> {
        self.mocked_requests.iter().find(|m| &m.id == mock_id)
    }
}

/// Response fields written by a save. Always complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePatch {
    pub status: u16,
    pub delay: u64,
    pub body: String,
}

impl From<ResponsePatch> for MockResponse {
    fn from(patch: ResponsePatch) -> Self {
        Self {
            status: Some(patch.status),
            delay: Some(patch.delay),
            body: Some(patch.body),
        }
    }
}

/// Payload for registering a new mock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMock {
    pub request_id: RequestId,
    pub active: bool,
    pub url: String,
    pub method: String,
    pub headers: HeaderMap,
    #[serde(default)]
    pub params: serde_json::Value,
    pub response: ResponsePatch,
}

/// Patch for updating an existing mock in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockPatch {
    pub url: String,
    pub headers: HeaderMap,
    pub response: ResponsePatch,
}

/// Numeric fields that editors may have saved as text, e.g. `"status": "503"`.
mod lenient {
    use serde::de::{Deserialize, Deserializer, Error};
    use serde_json::Value;
    use std::str::FromStr;

    fn parse<T, E>(value: Value) -> Result<Option<T>, E>
    where
        T: FromStr + TryFrom<u64>,
        E: Error,
    {
        match value {
            Value::Null => Ok(None),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("expected a number, got '{s}'"))),
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| T::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| E::custom(format!("number out of range: {n}"))),
            other => Err(E::custom(format!("expected a number, got {other}"))),
        }
    }

    pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + TryFrom<u64>,
    {
        parse::<T, D::Error>(Value::deserialize(deserializer)?)?
            .ok_or_else(|| D::Error::custom("expected a number"))
    }

    pub fn number_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + TryFrom<u64> + Default,
    {
        Ok(parse::<T, D::Error>(Value::deserialize(deserializer)?)?.unwrap_or_default())
    }

    pub fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + TryFrom<u64>,
    {
        parse::<T, D::Error>(Value::deserialize(deserializer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_deserializes_camel_case() {
        let json = r#"{
            "id": "checkout",
            "mockedRequests": [
                {"id": "m1", "url": "/cart", "requestId": "r1", "response": {"status": 500}}
            ]
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.id, ScenarioId::from("checkout"));
        let mock = &scenario.mocked_requests[0];
        assert_eq!(mock.request_id, Some(RequestId::from("r1")));
        assert!(mock.active);
        assert_eq!(mock.response.status, Some(500));
        assert_eq!(mock.response.delay, None);
        assert!(mock.headers.is_none());
    }

    #[test]
    fn test_request_defaults() {
        let json = r#"{
            "id": "r1",
            "url": "/a",
            "method": "GET",
            "response": {"status": 200}
        }"#;
        let request: Request = serde_json::from_str(json).unwrap();
        assert!(request.params.is_null());
        assert!(request.headers.is_empty());
        assert_eq!(request.response.delay, 0);
        assert_eq!(request.response.body, "");
    }

    #[test]
    fn test_numeric_fields_accept_text() {
        let json = r#"{
            "id": "r1",
            "url": "/a",
            "method": "GET",
            "response": {"status": "503", "delay": " 250 "}
        }"#;
        let request: Request = serde_json::from_str(json).unwrap();
        assert_eq!(request.response.status, 503);
        assert_eq!(request.response.delay, 250);

        let json = r#"{"id": "m1", "response": {"status": "404", "delay": ""}}"#;
        let mock: Mock = serde_json::from_str(json).unwrap();
        assert_eq!(mock.response.status, Some(404));
        assert_eq!(mock.response.delay, None);

        let bad = r#"{"id": "m1", "response": {"status": "soon"}}"#;
        assert!(serde_json::from_str::<Mock>(bad).is_err());
        let too_big = r#"{"id": "m1", "response": {"status": 70000}}"#;
        assert!(serde_json::from_str::<Mock>(too_big).is_err());
    }

    #[test]
    fn test_mock_from_new_and_patch() {
        let new = NewMock {
            request_id: RequestId::from("r1"),
            active: true,
            url: "/a".to_string(),
            method: "POST".to_string(),
            headers: HeaderMap::from_pairs([("x-a", "1")]),
            params: serde_json::json!({"q": "1"}),
            response: ResponsePatch {
                status: 201,
                delay: 10,
                body: "{}".to_string(),
            },
        };
        let mut mock = Mock::from_new(MockId::from("m1"), new);
        assert_eq!(mock.method.as_deref(), Some("POST"));
        assert_eq!(mock.response.status, Some(201));

        mock.apply_patch(MockPatch {
            url: "/b".to_string(),
            headers: HeaderMap::new(),
            response: ResponsePatch {
                status: 404,
                delay: 0,
                body: String::new(),
            },
        });
        assert_eq!(mock.url.as_deref(), Some("/b"));
        assert_eq!(mock.response.status, Some(404));
        assert_eq!(mock.method.as_deref(), Some("POST"));
        assert_eq!(mock.request_id, Some(RequestId::from("r1")));
    }
}
