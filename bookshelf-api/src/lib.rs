pub mod endpoints;
mod error;
mod macros;
pub mod repositories;
pub mod request;

pub use crate::error::{ApiError, ErrorResponse};
pub use request::{EmptyResponse, EndpointGroup, Request as ApiRequest, RequestData};
pub use reqwest::StatusCode;

use repositories::*;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Response;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "http://127.0.0.1:8000";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Source of the bearer token attached to outgoing requests.
///
/// Read once per request, so a token installed by a login is picked up by the
/// very next call.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub api_prefix: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Clone)]
pub struct Client {
    http_client: reqwest::Client,
    config: ClientConfig,
    tokens: Arc<dyn TokenSource>,
}

impl Client {
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenSource>) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
            tokens,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self, group: EndpointGroup) -> String {
        let host = self.config.host.trim_end_matches('/');
        match group {
            EndpointGroup::AuthRoot => host.to_string(),
            EndpointGroup::Api => {
                format!("{}{}", host, self.config.api_prefix.trim_end_matches('/'))
            }
        }
    }

    /// Resolve an endpoint against its group. Absolute URLs are used as given.
    pub fn url_for(&self, group: EndpointGroup, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        format!(
            "{}/{}",
            self.base_url(group),
            endpoint.trim_start_matches('/')
        )
    }

    /// Build the outgoing request without authentication.
    pub fn prepare<R>(&self, request: &R) -> Result<reqwest::Request, ApiError>
    where
        R: ApiRequest,
    {
        request.validate().map_err(ApiError::InvalidRequest)?;

        let url = self.url_for(R::GROUP, &request.endpoint());
        let builder = self.http_client.request(R::METHOD, url);
        let builder = match request.data() {
            RequestData::Empty => builder,
            RequestData::Query(query) => builder.query(query),
            RequestData::Json(body) => builder.json(body),
        };

        builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))
    }

    /// Attach `Authorization: Bearer <token>` when the session has a token,
    /// replacing any value already set on the request.
    pub fn authorize(&self, request: reqwest::Request) -> reqwest::Request {
        match self.tokens.bearer_token() {
            Some(token) => self.authorize_with(request, &token),
            None => request,
        }
    }

    /// Like [`authorize`](Self::authorize), with an explicit token instead of
    /// the session's. An empty token leaves the request untouched.
    pub fn authorize_with(&self, mut request: reqwest::Request, token: &str) -> reqwest::Request {
        if token.is_empty() {
            return request;
        }

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!("Session token is not a valid header value, sending without it");
            }
        }
        request
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        let mut prepared = self.prepare(&request)?;
        if !R::ANONYMOUS {
            prepared = self.authorize(prepared);
        }
        self.dispatch(prepared).await
    }

    /// Send `request` authenticated with `token` instead of the session's
    /// current token.
    pub async fn send_as<R>(&self, request: R, token: &str) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        let mut prepared = self.prepare(&request)?;
        if !R::ANONYMOUS {
            prepared = self.authorize_with(prepared, token);
        }
        self.dispatch(prepared).await
    }

    async fn dispatch<T>(&self, prepared: reqwest::Request) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(method = %prepared.method(), url = %prepared.url(), "Sending request");

        let response = self.on_response(self.execute(prepared).await)?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return serde_json::from_slice(b"null").map_err(ApiError::from);
        }
        serde_json::from_slice(&body).map_err(ApiError::from)
    }

    async fn execute(&self, request: reqwest::Request) -> Result<Response, ApiError> {
        let response = self.http_client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = %status, "Request failed");
        Err(ApiError::from_status(status, &body))
    }

    /// Response hook. Response-level recovery such as a token refresh would
    /// live here; for now results pass through untouched.
    fn on_response(&self, result: Result<Response, ApiError>) -> Result<Response, ApiError> {
        result
    }
}

pub struct Request;

impl Request {
    pub fn accounts() -> AccountRepository {
        AccountRepository::new()
    }

    pub fn books() -> BookRepository {
        BookRepository::new()
    }

    pub fn community() -> CommunityRepository {
        CommunityRepository::new()
    }
}
