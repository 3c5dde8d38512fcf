use bookshelf_auth::SessionContext;
use std::collections::BTreeMap;

pub type Params = BTreeMap<String, String>;

pub const LOGIN_ROUTE: &str = "login";

/// A navigation target.
///
/// Patterns are slash-separated; a `:name` segment captures that segment as a
/// parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub pattern: &'static str,
    pub requires_auth: bool,
}

impl Route {
    pub fn new(name: &'static str, pattern: &'static str) -> Self {
        Self {
            name,
            pattern,
            requires_auth: false,
        }
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    fn matches(&self, segments: &[&str]) -> Option<Params> {
        let pattern: Vec<&str> = split(self.pattern).collect();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (expected, actual) in pattern.iter().zip(segments) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    params.insert(name.to_string(), actual.to_string());
                }
                None if expected == actual => {}
                None => return None,
            }
        }
        Some(params)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
}

/// Decide whether a navigation may proceed.
pub fn guard(requires_auth: bool, is_authenticated: bool) -> GuardDecision {
    if requires_auth && !is_authenticated {
        GuardDecision::RedirectToLogin
    } else {
        GuardDecision::Allow
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: &'static str,
    pub path: String,
    pub params: Params,
    pub requires_auth: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed(ResolvedRoute),
    Redirect { to: &'static str, from: String },
    NotFound(String),
}

pub struct Router {
    routes: Vec<Route>,
    login_route: &'static str,
}

impl Router {
    pub fn new(routes: Vec<Route>, login_route: &'static str) -> Self {
        Self {
            routes,
            login_route,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Match `path` against the table. The first matching route wins.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let path = normalize(path);
        let segments: Vec<&str> = split(&path).collect();

        self.routes.iter().find_map(|route| {
            route.matches(&segments).map(|params| ResolvedRoute {
                name: route.name,
                path: path.clone(),
                params,
                requires_auth: route.requires_auth,
            })
        })
    }

    pub fn navigate(&self, path: &str, session: &SessionContext) -> Navigation {
        self.decide(path, session.is_authenticated())
    }

    pub fn decide(&self, path: &str, is_authenticated: bool) -> Navigation {
        let Some(resolved) = self.resolve(path) else {
            return Navigation::NotFound(path.to_string());
        };

        match guard(resolved.requires_auth, is_authenticated) {
            GuardDecision::Allow => Navigation::Proceed(resolved),
            GuardDecision::RedirectToLogin => Navigation::Redirect {
                to: self.login_route,
                from: resolved.path,
            },
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(
            vec![
                Route::new("home", "/"),
                Route::new("book-detail", "/books/:isbn13"),
                Route::new("community", "/community"),
                Route::new("thread-create", "/community/create").requires_auth(),
                Route::new("thread-detail", "/community/:id"),
                Route::new(LOGIN_ROUTE, "/login"),
                Route::new("signup", "/signup"),
                Route::new("profile", "/profile/:username").requires_auth(),
            ],
            LOGIN_ROUTE,
        )
    }
}

/// Drop any query string or fragment and the trailing slash.
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
