//! Session Manager
//!
//! Owns the authentication state and the `userToken` / `userData` storage
//! keys. Nothing else in the application writes those keys.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

use volunteer_api::{ApiResponse, AuthApi, AuthResponse, Credentials, SignupRequest, User};
use volunteer_storage::KeyValueStore;

use crate::error::{AuthFailure, SessionError};
use crate::session::{Session, SessionPhase};
use crate::Result;

/// Storage key holding the raw token string
pub const TOKEN_KEY: &str = "userToken";
/// Storage key holding the JSON-serialized user record
pub const USER_KEY: &str = "userData";

const NOTICE_CAPACITY: usize = 16;

struct SessionState {
    session: Session,
    restored: bool,
}

impl SessionState {
    fn phase(&self) -> SessionPhase {
        if !self.restored {
            SessionPhase::Initializing
        } else if self.session.is_logged_in() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    fn enter(&mut self, target: SessionPhase, session: Session) {
        let from = self.phase();
        debug_assert!(
            from.can_transition_to(target),
            "invalid session transition {from} -> {target}"
        );

        self.session = session;
        self.restored = true;

        tracing::debug!(%from, to = %target, "Session transition");
    }
}

/// Token and user issued by a successful login or signup
struct Grant {
    token: String,
    user: Option<User>,
}

/// Clears the busy flag if a login/signup future is dropped mid-flight.
struct BusyGuard<'a> {
    state: &'a RwLock<SessionState>,
    armed: bool,
}

impl BusyGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.write().session.is_loading = false;
        }
    }
}

pub struct SessionManager {
    state: Arc<RwLock<SessionState>>,
    store: Arc<dyn KeyValueStore>,
    api: Arc<dyn AuthApi>,
    notices: broadcast::Sender<AuthFailure>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>, api: Arc<dyn AuthApi>) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);

        Self {
            state: Arc::new(RwLock::new(SessionState {
                session: Session::initializing(),
                restored: false,
            })),
            store,
            api,
            notices,
        }
    }

    /// User-facing failure notifications from login and signup.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthFailure> {
        self.notices.subscribe()
    }

    // === Reads ===

    pub fn session(&self) -> Session {
        self.state.read().session.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().session.user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().session.token.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().session.is_loading
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.read().session.is_logged_in()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.read().phase()
    }

    /// Id of the logged-in user, for endpoints keyed by user.
    pub fn authenticated_user_id(&self) -> Result<i64> {
        let state = self.state.read();
        if !state.session.is_logged_in() {
            return Err(SessionError::NotAuthenticated);
        }
        state.session.user_id().ok_or(SessionError::MissingUserId)
    }

    // === Actions ===

    /// Restore a previous session from storage.
    ///
    /// Runs once; later calls are ignored. Never fails: anything unreadable
    /// in storage leaves the session logged out.
    pub fn restore(&self) {
        let mut state = self.state.write();
        if state.restored {
            tracing::warn!("Session already restored, ignoring");
            return;
        }

        let token = match self.store.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                // Fail open to Anonymous rather than block startup
                tracing::error!(error = %e, "Error loading auth token from storage");
                None
            }
        };

        let user = if token.is_some() { self.load_user() } else { None };

        let target = if token.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        };

        state.enter(
            target,
            Session {
                user,
                token,
                is_loading: false,
            },
        );

        tracing::info!(phase = %target, "Session restored");
    }

    /// Log in with email and password.
    ///
    /// Returns `true` once the session is authenticated. Every failure
    /// returns `false` and is published to [`SessionManager::subscribe`]
    /// receivers; nothing is persisted on failure. Rejected immediately while
    /// another session operation is in flight.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let Some(busy) = self.begin("login") else {
            return false;
        };

        tracing::info!(email, "Attempting login");

        let credentials = Credentials::new(email, password);
        let response = self.api.login(&credentials).await;
        self.finish(busy, "login", response)
    }

    /// Create an account; on success the new account is logged in.
    pub async fn signup(&self, request: &SignupRequest) -> bool {
        let Some(busy) = self.begin("signup") else {
            return false;
        };

        tracing::info!(email = %request.email, role = %request.role, "Attempting signup");

        let response = self.api.signup(request).await;
        self.finish(busy, "signup", response)
    }

    /// Clear the persisted token and user, then the in-memory session.
    ///
    /// Storage errors are logged and do not stop the logout.
    pub fn logout(&self) {
        if !self.try_mark_busy("logout") {
            return;
        }

        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::error!(key, error = %e, "Logout error while clearing storage");
            }
        }

        let mut state = self.state.write();
        let from = state.phase();
        state.enter(
            SessionPhase::Anonymous,
            Session {
                user: None,
                token: None,
                is_loading: false,
            },
        );

        tracing::info!(%from, "Logged out");
    }

    // === Internals ===

    fn try_mark_busy(&self, operation: &'static str) -> bool {
        let mut state = self.state.write();
        if state.session.is_loading {
            tracing::warn!(operation, phase = %state.phase(), "Session busy, rejecting");
            return false;
        }
        state.session.is_loading = true;
        true
    }

    fn begin(&self, operation: &'static str) -> Option<BusyGuard<'_>> {
        self.try_mark_busy(operation).then(|| BusyGuard {
            state: &self.state,
            armed: true,
        })
    }

    fn finish(
        &self,
        busy: BusyGuard<'_>,
        operation: &'static str,
        response: volunteer_api::Result<ApiResponse>,
    ) -> bool {
        let succeeded = match interpret(response) {
            Ok(grant) => {
                self.persist(&grant);

                let role = grant
                    .user
                    .as_ref()
                    .and_then(|user| user.role.as_ref())
                    .map(|role| role.to_string());

                self.state.write().enter(
                    SessionPhase::Authenticated,
                    Session {
                        user: grant.user,
                        token: Some(grant.token),
                        is_loading: false,
                    },
                );

                tracing::info!(
                    operation,
                    role = role.as_deref().unwrap_or("none"),
                    "Login successful"
                );
                true
            }
            Err(failure) => {
                self.state.write().session.is_loading = false;
                tracing::warn!(operation, reason = %failure, "Authentication failed");
                self.notify(failure);
                false
            }
        };

        busy.disarm();
        succeeded
    }

    fn load_user(&self) -> Option<User> {
        let raw = match self.store.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::error!(error = %e, "Error loading user data from storage");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::error!(error = %e, "Stored user data is not a valid user record");
                None
            }
        }
    }

    fn persist(&self, grant: &Grant) {
        if let Err(e) = self.store.set(TOKEN_KEY, &grant.token) {
            tracing::error!(error = %e, "Failed to persist auth token");
        }

        // Never leave a previous account's record next to a new token
        let result = match &grant.user {
            Some(user) => match serde_json::to_string(user) {
                Ok(json) => self.store.set(USER_KEY, &json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize user data");
                    self.store.remove(USER_KEY)
                }
            },
            None => self.store.remove(USER_KEY),
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "Failed to persist user data");
        }
    }

    fn notify(&self, failure: AuthFailure) {
        if self.notices.send(failure).is_err() {
            tracing::debug!("No notification subscribers");
        }
    }
}

/// Sort a login/signup response into a grant or a failure kind.
fn interpret(
    response: volunteer_api::Result<ApiResponse>,
) -> std::result::Result<Grant, AuthFailure> {
    let response = match response {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Auth request did not reach the server");
            return Err(AuthFailure::Transport);
        }
    };

    let body = AuthResponse::from_body(&response.body);

    if !response.is_success() {
        tracing::debug!(status = response.status, "Auth request rejected");
        return Err(AuthFailure::rejected(body.message));
    }

    match body.token {
        Some(token) => Ok(Grant {
            token,
            user: body.user,
        }),
        None => {
            tracing::error!(status = response.status, "Server returned success but no token");
            Err(AuthFailure::Protocol)
        }
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            store: Arc::clone(&self.store),
            api: Arc::clone(&self.api),
            notices: self.notices.clone(),
        }
    }
}
