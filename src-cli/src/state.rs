//! Application state management
use parking_lot::Mutex;
use tokio::sync::broadcast::{self, error::TryRecvError};
use volunteer_core::{App, AuthFailure, Config, Result};

/// App plus the subscription to its session notices
pub struct AppState {
    app: App,
    notices: Mutex<broadcast::Receiver<AuthFailure>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::from_app(App::new(config)?))
    }

    pub fn from_app(app: App) -> Self {
        let notices = Mutex::new(app.session_manager().subscribe());
        Self { app, notices }
    }

    pub fn initialize(&self) {
        self.app.initialize();
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Take every pending notice, oldest first.
    pub fn drain_notices(&self) -> Vec<AuthFailure> {
        let mut receiver = self.notices.lock();
        let mut drained = Vec::new();

        loop {
            match receiver.try_recv() {
                Ok(notice) => drained.push(notice),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Dropped session notices");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        drained
    }
}
