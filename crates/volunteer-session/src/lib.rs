//! Volunteer Session Management
//!
//! - One session per running application, constructed explicitly
//! - The session is restored from local storage before any routing decision
//! - Login and signup persist the issued token; logout clears it
//! - Storage failures fail open to a logged-out session and are never surfaced

mod error;
mod manager;
mod session;

pub use error::{AuthFailure, SessionError};
pub use manager::{SessionManager, TOKEN_KEY, USER_KEY};
pub use session::{Session, SessionPhase};

pub type Result<T> = std::result::Result<T, SessionError>;
