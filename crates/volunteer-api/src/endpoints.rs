//! Endpoint URL builders

use std::fmt::Display;
use url::Url;

use crate::error::ApiError;
use crate::Result;

/// Development server address; override through configuration on devices.
pub const DEFAULT_BASE_URL: &str = "http://10.11.66.176:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{base_url}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn login(&self) -> String {
        format!("{}/auth/login", self.base)
    }

    pub fn signup(&self) -> String {
        format!("{}/auth/signup", self.base)
    }

    pub fn events(&self) -> String {
        format!("{}/events", self.base)
    }

    pub fn event_details(&self, id: impl Display) -> String {
        format!("{}/events/{id}", self.base)
    }

    pub fn event_register(&self, event_id: impl Display, user_id: impl Display) -> String {
        format!("{}/events/{event_id}/register/{user_id}", self.base)
    }

    pub fn user_events(&self, user_id: impl Display) -> String {
        format!("{}/events/user/{user_id}", self.base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_URL.to_string(),
        }
    }
}
