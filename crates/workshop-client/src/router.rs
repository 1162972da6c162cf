//! Route history and the navigation guard.

use crate::session::SessionStore;
use parking_lot::Mutex;
use std::sync::Arc;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const CLIENTS_PATH: &str = "/clients";
pub const VEHICLES_PATH: &str = "/vehicles";
pub const REPAIRS_PATH: &str = "/repairs";

/// Paths reachable without a session.
pub const PUBLIC_PAGES: &[&str] = &[LOGIN_PATH];

/// Something that can move the front end to a path.
pub trait Navigator: Send + Sync + 'static {
    fn push(&self, path: &str);
}

/// In-memory navigation history.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.entries.lock().last().cloned()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

impl Navigator for History {
    fn push(&self, path: &str) {
        tracing::debug!("navigate -> {}", path);
        self.entries.lock().push(path.to_string());
    }
}

/// Outcome of the guard for one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(String),
}

/// Path part of a route, without query or fragment.
fn route_path(to: &str) -> &str {
    to.split(['?', '#']).next().unwrap_or(to)
}

/// Keeps unauthenticated users on public pages.
pub struct NavigationGuard {
    session: Arc<SessionStore>,
    public_pages: Vec<String>,
}

impl NavigationGuard {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            public_pages: PUBLIC_PAGES.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn with_public_page(mut self, path: impl Into<String>) -> Self {
        self.public_pages.push(path.into());
        self
    }

    pub fn requires_auth(&self, to: &str) -> bool {
        let path = route_path(to);
        !self.public_pages.iter().any(|p| p == path)
    }

    /// Run before every transition. A blocked destination is remembered as
    /// the session's return URL.
    pub fn before_each(&self, to: &str) -> Navigation {
        if self.requires_auth(to) && !self.session.is_authenticated() {
            self.session.set_return_url(Some(to.to_string()));
            return Navigation::Redirect(LOGIN_PATH.to_string());
        }
        Navigation::Proceed
    }
}

/// Guarded navigation over a [`History`].
pub struct Router {
    guard: NavigationGuard,
    history: Arc<History>,
}

impl Router {
    pub fn new(guard: NavigationGuard, history: Arc<History>) -> Self {
        Self { guard, history }
    }

    pub fn navigate(&self, to: &str) -> Navigation {
        let decision = self.guard.before_each(to);
        match &decision {
            Navigation::Proceed => self.history.push(to),
            Navigation::Redirect(target) => self.history.push(target),
        }
        decision
    }

    pub fn current(&self) -> Option<String> {
        self.history.current()
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }
}
