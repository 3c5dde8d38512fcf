use bookshelf_auth::{MemoryStore, Settings};
use std::sync::Arc;

use crate::router::Navigation;
use crate::App;

/// An [`App`] over in-memory session storage, pointed at a test backend.
pub struct TestApp {
    app: App,
    storage: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new(host: &str) -> Self {
        Self::with_storage(host, Arc::new(MemoryStore::new()))
    }

    /// Start an app over existing storage, as a restarted process would.
    pub fn with_storage(host: &str, storage: Arc<MemoryStore>) -> Self {
        let settings = Settings {
            host: host.to_string(),
            ..Settings::default()
        };
        let app = App::new(&settings, storage.clone()).expect("test settings are valid");
        Self { app, storage }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn storage(&self) -> Arc<MemoryStore> {
        self.storage.clone()
    }

    /// Assert that navigating to `path` lands on the route named `expected`
    pub fn assert_proceeds(&self, path: &str, expected: &str) {
        match self.app.navigate(path) {
            Navigation::Proceed(route) => assert_eq!(
                route.name, expected,
                "Navigated to {} instead of {}",
                route.name, expected
            ),
            other => panic!("Expected navigation to {} to proceed, got {:?}", path, other),
        }
    }

    /// Assert that navigating to `path` is sent to the login route
    pub fn assert_redirected_to_login(&self, path: &str) {
        match self.app.navigate(path) {
            Navigation::Redirect { to, .. } => assert_eq!(to, crate::router::LOGIN_ROUTE),
            other => panic!("Expected {} to redirect to login, got {:?}", path, other),
        }
    }
}
