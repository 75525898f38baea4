//! Application state for the HTTP server.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::services::SchedulePlanner;

/// Default request body cap (1 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Shared application state passed to all handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<SchedulePlanner>,
    /// Consulted once per request for "today"
    pub clock: Arc<dyn Clock>,
    pub body_limit_bytes: usize,
}

impl AppState {
    /// State using the wall clock and the default body limit.
    pub fn new(planner: Arc<SchedulePlanner>) -> Self {
        Self {
            planner,
            clock: Arc::new(SystemClock),
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit_bytes = bytes;
        self
    }
}
