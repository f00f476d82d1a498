//! Which screen stack to show for a session

use serde::Serialize;
use volunteer_api::Role;
use volunteer_session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Session restore still running
    Loading,
    /// Logged out
    Welcome,
    VolunteerHome,
    OrganizationHome,
}

impl Route {
    pub fn for_session(session: &Session) -> Self {
        if session.is_loading {
            return Route::Loading;
        }
        if !session.is_logged_in() {
            return Route::Welcome;
        }

        match session.role() {
            Some(Role::Organization) => Route::OrganizationHome,
            Some(Role::Volunteer) => Route::VolunteerHome,
            Some(Role::Unknown(role)) => {
                tracing::warn!(%role, "Unknown role, using volunteer home");
                Route::VolunteerHome
            }
            None => Route::VolunteerHome,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Loading => "loading",
            Route::Welcome => "welcome",
            Route::VolunteerHome => "volunteer_home",
            Route::OrganizationHome => "organization_home",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
