//! Application state container
//!
//! Screens hold an [`App`] and go through it for every session and event
//! operation; the session is owned here and only read elsewhere.

use std::sync::Arc;

use volunteer_api::{ApiClient, AuthApi, Event, EventsApi, Registration, SignupRequest, UserEvent};
use volunteer_session::{Session, SessionManager};
use volunteer_storage::{Database, KeyValueStore};

use crate::config::Config;
use crate::feed::EventFeed;
use crate::routing::Route;
use crate::Result;

pub struct App {
    config: Config,
    session_manager: SessionManager,
    events: Arc<dyn EventsApi>,
}

impl App {
    /// Open the local database and connect the API client from `config`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let db = Database::open(&config.database_path)?;
        let client = Arc::new(ApiClient::new(
            &config.api_base_url,
            config.request_timeout(),
        )?);

        tracing::debug!(
            api = %config.api_base_url,
            db = %config.database_path.display(),
            "App created"
        );

        Ok(Self::with_parts(
            config,
            Arc::new(db),
            client.clone(),
            client,
        ))
    }

    /// Assemble from already-built parts.
    pub fn with_parts(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        auth: Arc<dyn AuthApi>,
        events: Arc<dyn EventsApi>,
    ) -> Self {
        Self {
            config,
            session_manager: SessionManager::new(store, auth),
            events,
        }
    }

    /// Restore the persisted session. Call once at startup.
    pub fn initialize(&self) {
        self.session_manager.restore();
        tracing::info!(route = %self.route(), "App initialized");
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // === Session operations ===

    pub fn session_manager(&self) -> &SessionManager {
        &self.session_manager
    }

    pub fn session(&self) -> Session {
        self.session_manager.session()
    }

    pub fn route(&self) -> Route {
        Route::for_session(&self.session_manager.session())
    }

    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.session_manager.login(email, password).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> bool {
        self.session_manager.signup(request).await
    }

    pub fn logout(&self) {
        self.session_manager.logout();
    }

    // === Event operations ===

    pub async fn event_feed(&self) -> Result<EventFeed> {
        let token = self.session_manager.token();
        let events = self.events.list_events(token.as_deref()).await?;

        tracing::debug!(count = events.len(), "Loaded events");

        Ok(EventFeed::new(events, self.config.page_size))
    }

    pub async fn event(&self, event_id: i64) -> Result<Event> {
        let token = self.session_manager.token();
        Ok(self.events.event_details(event_id, token.as_deref()).await?)
    }

    /// Sign the logged-in user up for an event.
    pub async fn register(&self, event_id: i64) -> Result<Registration> {
        let user_id = self.session_manager.authenticated_user_id()?;
        let token = self.session_manager.token();

        let registration = self
            .events
            .register_for_event(event_id, user_id, token.as_deref())
            .await?;

        tracing::info!(event_id, user_id, "Registered for event");
        Ok(registration)
    }

    /// Events the logged-in user is registered for.
    pub async fn my_events(&self) -> Result<Vec<UserEvent>> {
        let user_id = self.session_manager.authenticated_user_id()?;
        let token = self.session_manager.token();

        Ok(self.events.user_events(user_id, token.as_deref()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use volunteer_api::{ApiError, ApiResponse, Credentials};
    use volunteer_session::{SessionError, TOKEN_KEY, USER_KEY};
    use volunteer_storage::MemoryStore;

    struct StubAuth {
        status: u16,
        body: String,
    }

    #[async_trait]
    impl AuthApi for StubAuth {
        async fn login(&self, _credentials: &Credentials) -> volunteer_api::Result<ApiResponse> {
            Ok(ApiResponse::new(self.status, self.body.clone()))
        }

        async fn signup(&self, _request: &SignupRequest) -> volunteer_api::Result<ApiResponse> {
            Ok(ApiResponse::new(self.status, self.body.clone()))
        }
    }

    #[derive(Default)]
    struct StubEvents {
        last_token: Mutex<Option<String>>,
        last_register: Mutex<Option<(i64, i64)>>,
    }

    impl StubEvents {
        fn event(id: i64, title: &str) -> Event {
            serde_json::from_value(serde_json::json!({
                "event_id": id,
                "title": title,
                "start_date": "2025-03-08",
                "end_date": "2025-03-08"
            }))
            .unwrap()
        }
    }

    #[async_trait]
    impl EventsApi for StubEvents {
        async fn list_events(&self, token: Option<&str>) -> volunteer_api::Result<Vec<Event>> {
            *self.last_token.lock() = token.map(str::to_string);
            Ok((1..=25).map(|id| Self::event(id, &format!("Event {id}"))).collect())
        }

        async fn event_details(
            &self,
            event_id: i64,
            _token: Option<&str>,
        ) -> volunteer_api::Result<Event> {
            if event_id == 1 {
                Ok(Self::event(1, "Beach Cleanup"))
            } else {
                Err(ApiError::Status {
                    status: 404,
                    message: Some("Event not found".to_string()),
                })
            }
        }

        async fn register_for_event(
            &self,
            event_id: i64,
            user_id: i64,
            token: Option<&str>,
        ) -> volunteer_api::Result<Registration> {
            *self.last_token.lock() = token.map(str::to_string);
            *self.last_register.lock() = Some((event_id, user_id));
            Ok(Registration {
                message: Some("Registered".to_string()),
                user_id: Some(user_id),
                event_id: Some(event_id),
            })
        }

        async fn user_events(
            &self,
            user_id: i64,
            _token: Option<&str>,
        ) -> volunteer_api::Result<Vec<UserEvent>> {
            Ok(vec![UserEvent {
                user_id,
                event_id: 1,
                event: Self::event(1, "Beach Cleanup"),
            }])
        }
    }

    const ORG_LOGIN: &str =
        r#"{"token":"T1","user":{"user_id":7,"email":"org@example.com","role":"organization"}}"#;

    fn app_with(store: MemoryStore, body: &str) -> (App, Arc<StubEvents>) {
        let events = Arc::new(StubEvents::default());
        let mut config = Config::new(PathBuf::from("/tmp/unused"));
        config.page_size = 10;

        let app = App::with_parts(
            config,
            Arc::new(store),
            Arc::new(StubAuth {
                status: 200,
                body: body.to_string(),
            }),
            events.clone(),
        );
        (app, events)
    }

    #[tokio::test]
    async fn test_route_follows_session() {
        let (app, _) = app_with(MemoryStore::new(), ORG_LOGIN);
        assert_eq!(app.route(), Route::Loading);

        app.initialize();
        assert_eq!(app.route(), Route::Welcome);

        assert!(app.login("org@example.com", "pw").await);
        assert_eq!(app.route(), Route::OrganizationHome);

        app.logout();
        assert_eq!(app.route(), Route::Welcome);
    }

    #[tokio::test]
    async fn test_register_requires_login() {
        let (app, events) = app_with(MemoryStore::new(), ORG_LOGIN);
        app.initialize();

        let err = app.register(1).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Session(SessionError::NotAuthenticated)
        ));
        assert!(events.last_register.lock().is_none());
    }

    #[tokio::test]
    async fn test_register_uses_session_user_and_token() {
        let (app, events) = app_with(MemoryStore::new(), ORG_LOGIN);
        app.initialize();
        assert!(app.login("org@example.com", "pw").await);

        let registration = app.register(3).await.unwrap();
        assert_eq!(registration.event_id, Some(3));
        assert_eq!(*events.last_register.lock(), Some((3, 7)));
        assert_eq!(events.last_token.lock().as_deref(), Some("T1"));

        let mine = app.my_events().await.unwrap();
        assert_eq!(mine[0].user_id, 7);
    }

    #[tokio::test]
    async fn test_restored_token_without_user_id() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "T9").unwrap();
        store.set(USER_KEY, r#"{"email":"x@example.com"}"#).unwrap();

        let (app, _) = app_with(store, ORG_LOGIN);
        app.initialize();
        assert_eq!(app.route(), Route::VolunteerHome);

        let err = app.my_events().await.unwrap_err();
        assert!(matches!(err, CoreError::Session(SessionError::MissingUserId)));
    }

    #[tokio::test]
    async fn test_event_feed_uses_page_size() {
        let (app, events) = app_with(MemoryStore::new(), ORG_LOGIN);
        app.initialize();

        let mut feed = app.event_feed().await.unwrap();
        assert_eq!(feed.total_pages(), 3);
        assert!(events.last_token.lock().is_none());

        feed.search("event 2");
        assert_eq!(feed.total_items(), 7);
    }

    #[tokio::test]
    async fn test_event_details_error_passes_through() {
        let (app, _) = app_with(MemoryStore::new(), ORG_LOGIN);
        app.initialize();

        assert_eq!(app.event(1).await.unwrap().title, "Beach Cleanup");
        let err = app.event(2).await.unwrap_err();
        assert!(err.to_string().contains("Event not found"));
    }

    #[test]
    fn test_new_opens_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("nested"));

        let app = App::new(config).unwrap();
        app.initialize();
        assert!(dir.path().join("nested/volunteer.db").exists());
        assert_eq!(app.route(), Route::Welcome);
    }
}
