use crate::error::AuthError;
use crate::session::{SessionStore, User};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use workshop_http::HttpService;

pub const LOGIN_ENDPOINT: &str = "/auth/login";

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// Login and logout on top of the shared [`SessionStore`].
#[derive(Clone)]
pub struct AuthStore {
    http: HttpService,
    session: Arc<SessionStore>,
}

impl AuthStore {
    pub fn new(http: HttpService, session: Arc<SessionStore>) -> Self {
        Self { http, session }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Exchange credentials for a token. On success the user is persisted and
    /// the front end moves to the remembered return URL (or home). On failure
    /// the session is left as it was.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let response = self
            .http
            .post(LOGIN_ENDPOINT, &Credentials { username, password })
            .await?;

        let user = response
            .data
            .and_then(User::from_value)
            .ok_or_else(|| {
                warn!("Login for {} returned no token", username);
                AuthError::InvalidSession
            })?;

        self.session.establish(user.clone())?;
        Ok(user)
    }

    pub fn logout(&self) {
        self.session.logout();
    }
}
