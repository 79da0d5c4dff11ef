use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use uuid::Uuid;

/// Cooperative cancellation flag shared by every stage of one dispatch.
/// Clones observe the same flag.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-dispatch data that flows alongside the request through the pipeline
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub dispatch_id: Uuid,
    pub cancellation: CancellationSignal,
    /// Raw credentials captured at the boundary (e.g. the Authorization header)
    pub credentials: Option<String>,
    started_at: Instant,
}

impl DispatchContext {
    pub fn new() -> Self {
        Self {
            dispatch_id: Uuid::new_v4(),
            cancellation: CancellationSignal::new(),
            credentials: None,
            started_at: Instant::now(),
        }
    }

    pub fn with_credentials(mut self, credentials: Option<String>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self::new()
    }
}
