use bookshelf_api::endpoints::accounts::UserProfile;
use bookshelf_api::TokenSource;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::storage::KeyValueStore;

pub(crate) const TOKEN_KEY: &str = "token";
pub(crate) const USER_KEY: &str = "user";

/// Current authentication state and cached profile.
///
/// `user` is only ever set while `token` is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

/// Shared handle to the application's session.
///
/// Clones refer to the same session. Readers (the HTTP client, the router)
/// take cheap snapshots; only the session store writes.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the session persisted by a previous run.
    ///
    /// Unreadable entries are discarded rather than failing start-up, and a
    /// stored profile without a stored token is dropped.
    pub fn rehydrate(storage: &dyn KeyValueStore) -> Self {
        let token = match storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token");
                None
            }
        };

        let user = match storage.get(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable stored profile");
                    discard(storage, USER_KEY);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored profile");
                None
            }
        };

        let user = match (&token, user) {
            (None, Some(_)) => {
                tracing::warn!("Discarding stored profile without a token");
                discard(storage, USER_KEY);
                None
            }
            (_, user) => user,
        };

        let session = Session { token, user };
        tracing::debug!(
            authenticated = session.is_authenticated(),
            "Session rehydrated"
        );
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenSource for SessionContext {
    fn bearer_token(&self) -> Option<String> {
        self.token()
    }
}

fn discard(storage: &dyn KeyValueStore, key: &str) {
    if let Err(e) = storage.remove(key) {
        tracing::warn!(key, error = %e, "Failed to remove stored entry");
    }
}
