//! Session commands
use serde::Serialize;
use volunteer_core::{Route, SessionPhase, User};

use super::CommandResult;
use crate::args::SignupArgs;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub logged_in: bool,
    pub phase: SessionPhase,
    pub route: Route,
    pub user: Option<User>,
}

impl SessionInfo {
    fn current(state: &AppState) -> Self {
        let app = state.app();
        let session = app.session();

        Self {
            logged_in: session.is_logged_in(),
            phase: app.session_manager().phase(),
            route: Route::for_session(&session),
            user: session.user,
        }
    }
}

pub async fn login(state: &AppState, email: &str, password: &str) -> CommandResult<SessionInfo> {
    if state.app().login(email, password).await {
        CommandResult::ok(SessionInfo::current(state))
    } else {
        CommandResult::err(failure_message(state))
    }
}

pub async fn signup(state: &AppState, args: SignupArgs) -> CommandResult<SessionInfo> {
    let request = args.into_request();
    if let Err(e) = request.validate() {
        return CommandResult::err(e.to_string());
    }

    if state.app().signup(&request).await {
        CommandResult::ok(SessionInfo::current(state))
    } else {
        CommandResult::err(failure_message(state))
    }
}

pub fn logout(state: &AppState) -> CommandResult<SessionInfo> {
    state.app().logout();
    CommandResult::ok(SessionInfo::current(state))
}

pub fn whoami(state: &AppState) -> CommandResult<SessionInfo> {
    CommandResult::ok(SessionInfo::current(state))
}

pub fn route(state: &AppState) -> CommandResult<Route> {
    CommandResult::ok(state.app().route())
}

/// Report queued notices on stderr and use the latest as the command error.
fn failure_message(state: &AppState) -> String {
    let notices = state.drain_notices();
    for notice in &notices {
        eprintln!("{}: {}", notice.title(), notice);
    }

    notices
        .last()
        .map(|notice| notice.to_string())
        .unwrap_or_else(|| "Another session operation is in progress".to_string())
}
