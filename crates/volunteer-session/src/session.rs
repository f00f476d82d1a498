//! Session snapshot and lifecycle states
//!
//! ```text
//! Initializing
//!   ↓ restore (token found / not found)
//! Authenticated ⇄ Anonymous
//!        logout ←  → login / signup
//! ```

use serde::Serialize;
use volunteer_api::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Restore from storage has not finished yet
    Initializing,
    /// No token
    Anonymous,
    /// Token present
    Authenticated,
}

impl SessionPhase {
    /// Check if transition to another phase is valid
    pub fn can_transition_to(&self, target: SessionPhase) -> bool {
        match (self, target) {
            // Restore resolves to either side
            (SessionPhase::Initializing, SessionPhase::Anonymous) => true,
            (SessionPhase::Initializing, SessionPhase::Authenticated) => true,
            // Login / signup
            (SessionPhase::Anonymous, SessionPhase::Authenticated) => true,
            // Logout
            (SessionPhase::Authenticated, SessionPhase::Anonymous) => true,
            // Failed login and repeated logout stay put
            (SessionPhase::Anonymous, SessionPhase::Anonymous) => true,
            (SessionPhase::Authenticated, SessionPhase::Authenticated) => true,
            // Nothing re-enters Initializing
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Initializing => "initializing",
            SessionPhase::Anonymous => "anonymous",
            SessionPhase::Authenticated => "authenticated",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only view of the authentication state.
///
/// `is_logged_in` is never stored; it is always derived from `token`.
#[derive(Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_loading: bool,
}

impl Session {
    /// State at construction, before restore has run.
    pub fn initializing() -> Self {
        Self {
            user: None,
            token: None,
            is_loading: true,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().and_then(|user| user.role.as_ref())
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().and_then(|user| user.id)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initializing()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("is_loading", &self.is_loading)
            .finish()
    }
}
