//! Volunteer Core
//!
//! Central coordination layer for the volunteer client. Screens read state
//! from [`App`] and call its actions; they never touch storage directly.

mod app;
mod config;
mod error;
mod feed;
mod format;
mod leaderboard;
mod routing;

pub use app::App;
pub use config::Config;
pub use error::CoreError;
pub use feed::{EventFeed, Page};
pub use format::{date_range, format_date, format_time, time_range, EventCard};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use routing::Route;

// Re-export core components
pub use volunteer_api::{
    ApiClient, ApiError, ApiResponse, AuthApi, Credentials, Endpoints, Event, EventsApi,
    OrganizationDetails, Registration, Role, SignupDetails, SignupRequest, User, UserEvent,
    VolunteerDetails,
};
pub use volunteer_session::{AuthFailure, Session, SessionError, SessionManager, SessionPhase};
pub use volunteer_storage::{Database, KeyValueStore, MemoryStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
