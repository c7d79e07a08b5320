use std::time::{Duration, Instant};

use uuid::Uuid;

/// Request-scoped information handed to status providers on the HTTP path.
///
/// Dropping the request future (client disconnect, transport timeout) cancels
/// any in-flight `status` call, so providers that await can rely on that and
/// need not poll for cancellation themselves.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub path: String,
    started_at: Instant,
}

impl RequestContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            path: path.into(),
            started_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
