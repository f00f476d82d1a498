//! HTTP client for the marketplace API

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::endpoints::Endpoints;
use crate::error::ApiError;
use crate::types::{Credentials, Event, Registration, SignupRequest, UserEvent};
use crate::Result;

/// Status code and raw body of a response that reached us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-provided `message` field, if the body carries one.
    pub fn message(&self) -> Option<String> {
        serde_json::from_str::<Value>(&self.body)
            .ok()?
            .get("message")?
            .as_str()
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
    }

    /// Decode a successful body, or turn a failure status into an error.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        self.ensure_success()?;
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Like [`ApiResponse::json`], but an empty body decodes to `T::default()`.
    pub fn json_or_default<T: DeserializeOwned + Default>(&self) -> Result<T> {
        self.ensure_success()?;
        if self.body.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&self.body)?)
    }

    fn ensure_success(&self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: self.status,
                message: self.message(),
            })
        }
    }
}

/// Authentication endpoints.
///
/// Both calls return `Err` only when no response arrived; any status code is
/// handed back as an [`ApiResponse`] for the caller to interpret.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<ApiResponse>;

    async fn signup(&self, request: &SignupRequest) -> Result<ApiResponse>;
}

/// Event browsing and registration endpoints.
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_events(&self, token: Option<&str>) -> Result<Vec<Event>>;

    async fn event_details(&self, event_id: i64, token: Option<&str>) -> Result<Event>;

    async fn register_for_event(
        &self,
        event_id: i64,
        user_id: i64,
        token: Option<&str>,
    ) -> Result<Registration>;

    async fn user_events(&self, user_id: i64, token: Option<&str>) -> Result<Vec<UserEvent>>;
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let endpoints = Endpoints::new(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send a request and collect the status and body.
    pub async fn request<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let method_name = method.as_str().to_string();
        let mut builder = self.http.request(method, url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(method = %method_name, url, error = %e, "API call failed");
            ApiError::Transport(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(method = %method_name, url, status, "API call completed");

        Ok(ApiResponse { status, body })
    }

    async fn get(&self, url: &str, token: Option<&str>) -> Result<ApiResponse> {
        self.request::<()>(Method::GET, url, None, token).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<ApiResponse> {
        let url = self.endpoints.login();
        self.request(Method::POST, &url, Some(credentials), None)
            .await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<ApiResponse> {
        let url = self.endpoints.signup();
        self.request(Method::POST, &url, Some(request), None).await
    }
}

#[async_trait]
impl EventsApi for ApiClient {
    async fn list_events(&self, token: Option<&str>) -> Result<Vec<Event>> {
        let url = self.endpoints.events();
        self.get(&url, token).await?.json()
    }

    async fn event_details(&self, event_id: i64, token: Option<&str>) -> Result<Event> {
        let url = self.endpoints.event_details(event_id);
        self.get(&url, token).await?.json()
    }

    async fn register_for_event(
        &self,
        event_id: i64,
        user_id: i64,
        token: Option<&str>,
    ) -> Result<Registration> {
        let url = self.endpoints.event_register(event_id, user_id);
        self.request::<()>(Method::POST, &url, None, token)
            .await?
            .json_or_default()
    }

    async fn user_events(&self, user_id: i64, token: Option<&str>) -> Result<Vec<UserEvent>> {
        let url = self.endpoints.user_events(user_id);
        self.get(&url, token).await?.json()
    }
}
