//! Authenticated session state and its durable storage.
//!
//! The store is the single source of truth for "who is logged in". It is
//! hydrated from storage once at startup and every change is written back,
//! so a restart restores the same session.

use crate::error::StorageError;
use crate::router::{Navigator, LOGIN_PATH};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use workshop_http::SessionContext;

/// A logged-in user: the bearer token plus whatever else the login
/// response carried.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub token: String,
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl User {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            claims: Map::new(),
        }
    }

    /// Accepts only objects with a non-empty string `token`.
    pub fn from_value(value: Value) -> Option<Self> {
        let user: User = serde_json::from_value(value).ok()?;
        if user.token.is_empty() {
            return None;
        }
        Some(user)
    }

    pub fn claim(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }
}

/// Durable key/value slot for the serialized user.
pub trait SessionStorage: Send + Sync + 'static {
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&self, value: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Session kept in a JSON file.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file under the workshop root.
    pub fn default_location() -> Self {
        Self::new(workshop_common::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local storage, for tests and throwaway sessions.
#[derive(Default)]
pub struct MemorySessionStorage {
    value: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.value.lock().clone()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.lock().clone())
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        *self.value.lock() = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.value.lock() = None;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    /// Where to go after the next successful login.
    pub return_url: Option<String>,
}

pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
}

impl SessionStore {
    /// Restore the persisted user. Unreadable or invalid entries start an
    /// anonymous session.
    pub fn hydrate(storage: Arc<dyn SessionStorage>, navigator: Arc<dyn Navigator>) -> Self {
        let user = match storage.load() {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) => {
                    let user = User::from_value(value);
                    if user.is_none() {
                        warn!("Stored session has no token, starting anonymous");
                    }
                    user
                }
                Err(e) => {
                    warn!("Stored session is not valid JSON ({}), starting anonymous", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read stored session: {}", e);
                None
            }
        };

        if user.is_some() {
            debug!("Restored persisted session");
        }

        Self {
            state: RwLock::new(SessionState {
                user,
                return_url: None,
            }),
            storage,
            navigator,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().user.is_some()
    }

    pub fn return_url(&self) -> Option<String> {
        self.state.read().return_url.clone()
    }

    pub fn set_return_url(&self, url: Option<String>) {
        self.state.write().return_url = url;
    }

    /// Store and persist a user. Storage is written first, under the state
    /// lock, so a failed write leaves the session unchanged.
    pub fn set_user(&self, user: User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&user)?;
        let mut state = self.state.write();
        self.storage.save(&raw)?;
        state.user = Some(user);
        Ok(())
    }

    /// Adopt a freshly logged-in user and move to the remembered page, or
    /// home. Returns the path navigated to.
    pub(crate) fn establish(&self, user: User) -> Result<String, StorageError> {
        self.set_user(user)?;
        let target = self
            .state
            .write()
            .return_url
            .take()
            .unwrap_or_else(|| crate::router::HOME_PATH.to_string());
        info!("Logged in, continuing to {}", target);
        self.navigator.push(&target);
        Ok(target)
    }

    /// Drop the session (if any) and go to the login page. Storage is
    /// cleared even when nobody is logged in.
    pub fn logout(&self) {
        {
            let mut state = self.state.write();
            state.user = None;
            self.clear_storage();
        }
        self.navigator.push(LOGIN_PATH);
    }

    /// Takes the user out of memory and storage. Returns `false`, touching
    /// nothing, when no user was present. Runs under one write lock.
    fn take_user(&self) -> bool {
        let mut state = self.state.write();
        if state.user.take().is_none() {
            return false;
        }
        self.clear_storage();
        true
    }

    fn clear_storage(&self) {
        if let Err(e) = self.storage.clear() {
            warn!("Failed to clear stored session: {}", e);
        }
    }
}

impl SessionContext for SessionStore {
    fn token(&self) -> Option<String> {
        self.state.read().user.as_ref().map(|u| u.token.clone())
    }

    fn invalidate(&self) -> bool {
        if !self.take_user() {
            return false;
        }
        info!("Session rejected by server, logging out");
        self.navigator.push(LOGIN_PATH);
        true
    }
}
