use super::{expose_secret, path_segment};
use crate::request::{EndpointGroup, Request, RequestData};
use reqwest::Method;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

// Common

/// Profile record returned by the backend.
///
/// Only `username` is interpreted; every other field is carried verbatim so
/// the record round-trips through storage unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

// Requests

#[derive(Debug, Serialize)]
pub struct ObtainToken {
    username: String,
    #[serde(serialize_with = "expose_secret")]
    password: SecretString,
}

impl ObtainToken {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Request for ObtainToken {
    type Data = Self;
    type Response = TokenResponse;
    const METHOD: Method = Method::POST;
    const GROUP: EndpointGroup = EndpointGroup::AuthRoot;
    const ANONYMOUS: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        "/accounts/api/token/".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

/// Registration payload
#[derive(Debug, Serialize)]
pub struct Signup {
    username: String,
    #[serde(serialize_with = "expose_secret")]
    password: SecretString,
}

impl Signup {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Request for Signup {
    type Data = Self;
    type Response = crate::EmptyResponse;
    const METHOD: Method = Method::POST;
    const GROUP: EndpointGroup = EndpointGroup::AuthRoot;
    const ANONYMOUS: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        "/accounts/signup/".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct GetProfile {
    username: String,
    segment: Option<String>,
}

impl GetProfile {
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            segment: path_segment(&username),
            username,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Request for GetProfile {
    type Data = ();
    type Response = UserProfile;
    const GROUP: EndpointGroup = EndpointGroup::AuthRoot;

    fn endpoint(&self) -> Cow<'_, str> {
        format!(
            "/accounts/profile/{}/",
            self.segment.as_deref().unwrap_or_default()
        )
        .into()
    }

    fn validate(&self) -> Result<(), String> {
        match self.segment {
            Some(_) => Ok(()),
            None => Err(format!("{:?} is not a valid username", self.username)),
        }
    }
}

/// Toggle whether the session user follows `user_id`. Following yourself is
/// rejected by the backend with a 400.
#[derive(Debug, Clone)]
pub struct FollowUser {
    user_id: u64,
}

impl FollowUser {
    pub fn new(user_id: u64) -> Self {
        Self { user_id }
    }
}

impl Request for FollowUser {
    type Data = ();
    type Response = FollowStatus;
    const METHOD: Method = Method::POST;
    const GROUP: EndpointGroup = EndpointGroup::AuthRoot;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/accounts/follow/{}/", self.user_id).into()
    }
}

// Responses

/// Token endpoint response. Only the access credential is used; the refresh
/// token the backend also returns is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access: String,
}

/// Whether the session user follows the target after the toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FollowStatus {
    pub followed: bool,
}
