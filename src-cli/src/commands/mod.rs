//! Command handlers
//!
//! Every handler returns a [`CommandResult`] that is printed as JSON.

pub mod auth;
pub mod events;

use serde::Serialize;

pub use auth::{login, logout, route, signup, whoami, SessionInfo};
pub use events::{event, events, my_events, register, FeedPage};

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> CommandResult<T> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
