use bookshelf_api::{Client, Request};
use bookshelf_auth::{
    AuthError, FileStore, KeyValueStore, ProfileRefresh, SessionContext, SessionStore, Settings,
    UserProfile,
};
use std::sync::Arc;

use crate::router::{Navigation, Router};

#[derive(Debug)]
pub enum ProfileView {
    /// The session's own profile, refreshed into the session
    Own(ProfileRefresh),
    /// Another account's profile. The session is left alone.
    Other(UserProfile),
}

/// The session store, the client it drives and the router gated by it,
/// wired to one shared session.
pub struct App {
    store: SessionStore,
    router: Router,
}

impl App {
    pub fn new(settings: &Settings, storage: Arc<dyn KeyValueStore>) -> Result<Self, AuthError> {
        Ok(Self {
            store: SessionStore::open(settings, storage)?,
            router: Router::default(),
        })
    }

    /// Open the app over the on-disk session in the configured storage
    /// directory.
    pub fn open(settings: &Settings) -> Result<Self, AuthError> {
        let storage = FileStore::new(settings.storage_dir()?)?;
        tracing::debug!(dir = %storage.dir().display(), "Using session storage");
        Self::new(settings, Arc::new(storage))
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn session(&self) -> &SessionContext {
        self.store.context()
    }

    pub fn client(&self) -> &Client {
        self.store.client()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Look up `username`. Only the session's own profile is written back to
    /// the session; the token would otherwise be paired with someone else's
    /// record.
    pub async fn view_profile(&self, username: &str) -> Result<ProfileView, AuthError> {
        let own = self
            .session()
            .user()
            .is_some_and(|user| user.username == username);
        if own {
            return Ok(ProfileView::Own(self.store.fetch_profile(username).await));
        }

        tracing::debug!(username, "Fetching profile for display only");
        let profile = self
            .client()
            .send(Request::accounts().profile(username))
            .await
            .map_err(AuthError::ProfileFetchFailed)?;
        Ok(ProfileView::Other(profile))
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        let navigation = self.router.navigate(path, self.session());
        match &navigation {
            Navigation::Proceed(route) => {
                tracing::debug!(path, route = route.name, "Navigation allowed")
            }
            Navigation::Redirect { to, from } => {
                tracing::info!(from = %from, to, "Login required, redirecting")
            }
            Navigation::NotFound(path) => tracing::debug!(path = %path, "No route for path"),
        }
        navigation
    }
}
