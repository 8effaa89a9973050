use std::time::{Duration, Instant};

use shopadvisor_core::RequestId;

/// Per-request context, inserted by [`crate::middleware::request_context`].
///
/// Immutable; every handler can rely on it being present.
#[derive(Debug, Copy, Clone)]
pub struct RequestContext {
    request_id: RequestId,
    started_at: Instant,
}

impl RequestContext {
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            started_at: Instant::now(),
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
