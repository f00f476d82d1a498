//! Session error types

use thiserror::Error;

pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect to the server. Please try again.";
pub const MISSING_TOKEN_MESSAGE: &str = "Server returned success but no token was provided";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Why a login or signup did not produce a session.
///
/// Delivered to subscribers as a user-facing notification; the `Display`
/// text is what the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// No response reached the client
    #[error("{}", CONNECT_FAILED_MESSAGE)]
    Transport,

    /// The server answered with success but broke the response contract
    #[error("{}", MISSING_TOKEN_MESSAGE)]
    Protocol,

    /// The server rejected the request; carries its message or the fallback
    #[error("{0}")]
    Authentication(String),
}

impl AuthFailure {
    pub fn rejected(message: Option<String>) -> Self {
        AuthFailure::Authentication(
            message.unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string()),
        )
    }

    pub fn title(&self) -> &'static str {
        "Error"
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Logged-in user has no id")]
    MissingUserId,
}
