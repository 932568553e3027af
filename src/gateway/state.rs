use std::sync::Arc;
use std::time::Duration;

use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::session::MatchingSession;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<MatchingSession>,

    /// Upper bound on the time any single request may take.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(session: Arc<MatchingSession>, request_timeout: Duration) -> Self {
        Self {
            session,
            request_timeout,
        }
    }

    pub fn with_default_timeout(session: Arc<MatchingSession>) -> Self {
        Self::new(session, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }
}
