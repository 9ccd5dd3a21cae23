//! Signed-in user.
//!
//! There is no token: a successful login or registration persists the user
//! record through the [`SessionStore`], and that record alone is the session.

use std::sync::Arc;

use super::{ErrorNotice, RequestTicket, RequestTracker};
use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{NewUser, SessionUser, User};
use crate::traits::{SessionStore, SessionStoreError};

const LOGIN_FALLBACK: &str = "User not found";
const REGISTER_FALLBACK: &str = "Could not register user";

/// Session container.
///
/// Invariant: `user()` is `Some` exactly when authenticated.
pub struct SessionState {
    user: Option<SessionUser>,
    error: Option<ErrorNotice>,
    request: RequestTracker,
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("user", &self.user)
            .field("error", &self.error)
            .field("loading", &self.is_loading())
            .finish()
    }
}

impl SessionState {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            user: None,
            error: None,
            request: RequestTracker::new(),
            store,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_in_flight()
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Load the persisted user, if any.
    ///
    /// A corrupt session file is removed and the user stays signed out.
    /// Returns whether a session was restored.
    pub fn restore_session(&mut self) -> bool {
        match self.store.load() {
            Ok(Some(user)) => {
                tracing::info!("Restored session for {}", user.username);
                self.user = Some(user);
                true
            }
            Ok(None) => false,
            Err(SessionStoreError::Corrupt(reason)) => {
                tracing::warn!("Discarding corrupt session file: {}", reason);
                if let Err(e) = self.store.clear() {
                    tracing::warn!("Failed to remove corrupt session: {}", e);
                }
                false
            }
            Err(e) => {
                tracing::warn!("Could not read session: {}", e);
                false
            }
        }
    }

    /// Begin signing in as `username`.
    pub fn begin_login(&mut self, username: &str) -> ApiResult<RequestTicket> {
        if username.trim().is_empty() {
            return Err(self.reject(ApiError::validation("username", "Username is required")));
        }
        self.error = None;
        Ok(self.request.begin())
    }

    /// Apply the result of `GET /users/by-username/{username}`.
    pub fn apply_login(&mut self, ticket: RequestTicket, result: ApiResult<User>) -> bool {
        self.apply_auth(ticket, result, LOGIN_FALLBACK)
    }

    /// Begin registering `user`.
    pub fn begin_register(&mut self, user: &NewUser) -> ApiResult<RequestTicket> {
        if user.username.trim().is_empty() {
            return Err(self.reject(ApiError::validation("username", "Username is required")));
        }
        if user.email.trim().is_empty() {
            return Err(self.reject(ApiError::validation("email", "Email is required")));
        }
        self.error = None;
        Ok(self.request.begin())
    }

    /// Apply the result of `POST /users/`.
    pub fn apply_register(&mut self, ticket: RequestTicket, result: ApiResult<User>) -> bool {
        self.apply_auth(ticket, result, REGISTER_FALLBACK)
    }

    /// Sign in as an existing user.
    pub async fn login(&mut self, api: &ApiClient, username: &str) -> ApiResult<SessionUser> {
        let username = username.trim();
        let ticket = self.begin_login(username)?;
        let result = api.get_user(username).await;
        self.apply_login(ticket, result.clone());
        result.map(SessionUser::from)
    }

    /// Create an account and sign in as it.
    pub async fn register(&mut self, api: &ApiClient, user: &NewUser) -> ApiResult<SessionUser> {
        let ticket = self.begin_register(user)?;
        let result = api.create_user(user).await;
        self.apply_register(ticket, result.clone());
        result.map(SessionUser::from)
    }

    /// Sign in as `user` without asking the server.
    pub fn set_demo_user(&mut self, user: SessionUser) {
        self.request.invalidate();
        self.error = None;
        self.persist(&user);
        self.user = Some(user);
    }

    /// Forget the signed-in user, in memory and on disk.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("Signing out {}", user.username);
        }
        self.request.invalidate();
        self.error = None;
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear persisted session: {}", e);
        }
    }

    fn apply_auth(&mut self, ticket: RequestTicket, result: ApiResult<User>, fallback: &str) -> bool {
        if !self.request.settle(ticket) {
            return false;
        }
        match result {
            Ok(user) => {
                let user = SessionUser::from(&user);
                tracing::info!("Signed in as {}", user.username);
                self.persist(&user);
                self.user = Some(user);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(ErrorNotice::with_fallback(&err, fallback));
            }
        }
        true
    }

    fn persist(&self, user: &SessionUser) {
        if let Err(e) = self.store.save(user) {
            tracing::warn!("Failed to persist session: {}", e);
        }
    }

    fn reject(&mut self, err: ApiError) -> ApiError {
        self.error = Some(ErrorNotice::from_api(&err));
        err
    }
}
