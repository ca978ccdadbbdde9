use crate::roster::RosterService;
use crate::session::SessionManager;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionManager>,
    pub roster: Arc<RosterService>,
}

impl AppState {
    pub fn new(roster: Arc<RosterService>) -> Self {
        Self {
            session: Arc::clone(roster.session()),
            roster,
        }
    }
}

// Implement FromRef to allow extracting individual parts of the state
impl axum::extract::FromRef<AppState> for Arc<SessionManager> {
    fn from_ref(state: &AppState) -> Self {
        state.session.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<RosterService> {
    fn from_ref(state: &AppState) -> Self {
        state.roster.clone()
    }
}
