use bookshelf_api::endpoints::accounts::{Signup, UserProfile};
use bookshelf_api::{Client, Request};
use secrecy::SecretString;
use std::sync::Arc;

use crate::error::AuthError;
use crate::session::{SessionContext, TOKEN_KEY, USER_KEY};
use crate::settings::Settings;
use crate::storage::KeyValueStore;

/// Result of the profile refresh that follows a login
#[derive(Debug)]
pub enum ProfileRefresh {
    /// Profile fetched and stored
    Loaded(UserProfile),
    /// Fetch or storage failed; the session keeps its token
    Failed(AuthError),
    /// No session to attach the profile to, or the session changed while the
    /// request was in flight. Nothing was stored.
    Stale,
}

impl ProfileRefresh {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ProfileRefresh::Loaded(_))
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            ProfileRefresh::Loaded(profile) => Some(profile),
            _ => None,
        }
    }
}

/// A successful login. The token is installed regardless of `profile`.
#[derive(Debug)]
pub struct LoginOutcome {
    pub profile: ProfileRefresh,
}

/// Owns every change to the session and mirrors it into durable storage.
pub struct SessionStore {
    client: Client,
    context: SessionContext,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(client: Client, context: SessionContext, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            client,
            context,
            storage,
        }
    }

    /// Rehydrate the session from `storage` and build a client that reads its
    /// token from that session.
    pub fn open(settings: &Settings, storage: Arc<dyn KeyValueStore>) -> Result<Self, AuthError> {
        settings.validate().map_err(AuthError::Configuration)?;

        let context = SessionContext::rehydrate(storage.as_ref());
        let client = Client::new(settings.client_config(), Arc::new(context.clone()))
            .map_err(|e| AuthError::Configuration(e.to_string()))?;

        Ok(Self::new(client, context, storage))
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn login(
        &self,
        username: &str,
        password: impl Into<SecretString>,
    ) -> Result<LoginOutcome, AuthError> {
        let request = Request::accounts().token(username, password);
        let response = self.client.send(request).await.map_err(|e| {
            tracing::warn!(username, error = %e, "Login failed");
            AuthError::from_auth_call(e)
        })?;

        if response.access.is_empty() {
            return Err(AuthError::InvalidResponse(
                "Token response has an empty access credential".to_string(),
            ));
        }

        self.install_token(&response.access)?;
        tracing::info!(username, "Login succeeded");

        let profile = self.fetch_profile(username).await;
        Ok(LoginOutcome { profile })
    }

    /// Register a new account. The session is left as it is.
    pub async fn signup(&self, registration: Signup) -> Result<(), AuthError> {
        let username = registration.username().to_string();

        self.client.send(registration).await.map_err(|e| {
            tracing::warn!(username = %username, error = %e, "Signup failed");
            AuthError::from_auth_call(e)
        })?;

        tracing::info!(username = %username, "Signup succeeded");
        Ok(())
    }

    /// Fetch and store the profile for `username`. Never fails; the outcome
    /// says what happened.
    pub async fn fetch_profile(&self, username: &str) -> ProfileRefresh {
        let Some(token) = self.context.token().filter(|t| !t.is_empty()) else {
            tracing::debug!(username, "No session, skipping profile fetch");
            return ProfileRefresh::Stale;
        };

        let request = Request::accounts().profile(username);
        let profile = match self.client.send_as(request, &token).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(username, error = %e, "Fetch profile failed");
                return ProfileRefresh::Failed(AuthError::ProfileFetchFailed(e));
            }
        };

        let mut session = self.context.write();
        if session.token.as_deref() != Some(token.as_str()) {
            tracing::debug!(username, "Session changed during profile fetch, discarding");
            return ProfileRefresh::Stale;
        }

        let stored = serde_json::to_string(&profile)
            .map_err(AuthError::from)
            .and_then(|json| self.storage.set(USER_KEY, &json));
        if let Err(e) = stored {
            tracing::warn!(username, error = %e, "Failed to persist profile");
            return ProfileRefresh::Failed(e);
        }

        session.user = Some(profile.clone());
        tracing::debug!(username, "Profile stored");
        ProfileRefresh::Loaded(profile)
    }

    /// Clear the session in memory and in storage. Safe to call repeatedly.
    pub fn logout(&self) {
        let mut session = self.context.write();
        session.token = None;
        session.user = None;

        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "Failed to remove stored session entry");
            }
        }
        tracing::info!("Logged out");
    }

    /// Persist `token` and make it current. A cached profile belongs to the
    /// previous session and is dropped.
    fn install_token(&self, token: &str) -> Result<(), AuthError> {
        let mut session = self.context.write();

        self.storage.set(TOKEN_KEY, token)?;
        if let Err(e) = self.storage.remove(USER_KEY) {
            tracing::warn!(error = %e, "Failed to remove stored profile");
        }

        session.token = Some(token.to_string());
        session.user = None;
        Ok(())
    }
}
