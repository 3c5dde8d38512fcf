//! In-process stand-in for the accounts backend.
#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bookshelf_auth::{KeyValueStore, SessionStore, Settings};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
struct Account {
    password: String,
    token: String,
    profile: Value,
    token_delay: Duration,
}

#[derive(Default)]
struct BackendState {
    accounts: HashMap<String, Account>,
    profile_status: Option<StatusCode>,
    profile_delay: Duration,
    requests: Vec<Recorded>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Clone, Default)]
pub struct Backend {
    state: Arc<Mutex<BackendState>>,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, username: &str, password: &str, token: &str, profile: Value) -> Self {
        self.state.lock().unwrap().accounts.insert(
            username.to_string(),
            Account {
                password: password.to_string(),
                token: token.to_string(),
                profile,
                token_delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn with_token_delay(self, username: &str, delay: Duration) -> Self {
        if let Some(account) = self.state.lock().unwrap().accounts.get_mut(username) {
            account.token_delay = delay;
        }
        self
    }

    pub fn with_profile_status(self, status: StatusCode) -> Self {
        self.state.lock().unwrap().profile_status = Some(status);
        self
    }

    pub fn with_profile_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().profile_delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn is_registered(&self, username: &str) -> bool {
        self.state.lock().unwrap().accounts.contains_key(username)
    }

    fn record(&self, path: String, headers: &HeaderMap) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.state
            .lock()
            .unwrap()
            .requests
            .push(Recorded { path, authorization });
    }

    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/accounts/api/token/", post(obtain_token))
            .route("/accounts/signup/", post(signup))
            .route("/accounts/profile/{username}/", get(profile))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

async fn obtain_token(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("/accounts/api/token/".to_string(), &headers);

    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let account = backend
        .state
        .lock()
        .unwrap()
        .accounts
        .get(username)
        .filter(|account| account.password == password)
        .cloned();

    match account {
        Some(account) => {
            tokio::time::sleep(account.token_delay).await;
            Json(json!({"access": account.token, "refresh": "refresh-token"})).into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
            .into_response(),
    }
}

async fn signup(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("/accounts/signup/".to_string(), &headers);

    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    let mut state = backend.state.lock().unwrap();
    if username.is_empty() || state.accounts.contains_key(&username) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"username": ["A user with that username already exists."]})),
        )
            .into_response();
    }

    let account = Account {
        password,
        token: format!("T-{}", username),
        profile: json!({"id": state.accounts.len() + 1, "username": username}),
        token_delay: Duration::ZERO,
    };
    state.accounts.insert(username.clone(), account);
    (
        StatusCode::CREATED,
        Json(json!({"username": username, "followings": []})),
    )
        .into_response()
}

async fn profile(
    State(backend): State<Backend>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Response {
    backend.record(format!("/accounts/profile/{}/", username), &headers);

    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    let (authorized, status, delay, profile) = {
        let state = backend.state.lock().unwrap();
        let authorized = bearer
            .as_deref()
            .is_some_and(|token| state.accounts.values().any(|a| a.token == token));
        let profile = state.accounts.get(&username).map(|a| a.profile.clone());
        (authorized, state.profile_status, state.profile_delay, profile)
    };

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Authentication credentials were not provided."})),
        )
            .into_response();
    }
    if let Some(status) = status {
        return (status, Json(json!({"detail": "Server error"}))).into_response();
    }

    tokio::time::sleep(delay).await;
    match profile {
        Some(profile) => Json(profile).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response(),
    }
}

pub fn session_store(host: &str, storage: Arc<dyn KeyValueStore>) -> SessionStore {
    session_store_with_timeout(host, storage, 5000)
}

pub fn session_store_with_timeout(
    host: &str,
    storage: Arc<dyn KeyValueStore>,
    timeout_ms: u64,
) -> SessionStore {
    let settings = Settings {
        host: host.to_string(),
        timeout_ms,
        ..Settings::default()
    };
    SessionStore::open(&settings, storage).unwrap()
}
