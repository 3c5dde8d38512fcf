use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// Which base destination an endpoint path is resolved against.
///
/// The backend serves account operations from the host root and everything
/// else under a versioned prefix, so every request names its group instead of
/// building absolute URLs by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointGroup {
    /// `<host>` (account, token and registration endpoints)
    AuthRoot,
    /// `<host><api_prefix>`
    Api,
}

/// Payload attached to an outgoing request
#[derive(Debug)]
pub enum RequestData<T> {
    Empty,
    Query(T),
    Json(T),
}

/// A typed backend request.
///
/// Implementors describe where the request goes and what it carries; the
/// [`Client`](crate::Client) takes care of URLs, authentication and decoding.
pub trait Request {
    type Data: Serialize;
    type Response: DeserializeOwned;

    const METHOD: Method = Method::GET;
    const GROUP: EndpointGroup = EndpointGroup::Api;
    /// Anonymous requests never carry the session's bearer token.
    const ANONYMOUS: bool = false;

    fn endpoint(&self) -> Cow<'_, str>;

    /// Checked before the request is built; an error means nothing is sent.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

/// Response type for endpoints whose body is empty or not consumed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmptyResponse;

impl<'de> Deserialize<'de> for EmptyResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer)?;
        Ok(EmptyResponse)
    }
}
