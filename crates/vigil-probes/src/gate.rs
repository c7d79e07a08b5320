use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use vigil_core::{
    Named, ProviderError, ReadinessProvider, RequestContext, StatusProvider, StatusReport,
};

/// The server's own entry. Alive until the process exits, ready until
/// shutdown begins so orchestrators stop routing new work here.
#[derive(Debug)]
pub struct ShutdownGate {
    name: String,
    draining: AtomicBool,
}

impl ShutdownGate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            draining: AtomicBool::new(false),
        }
    }

    pub fn begin_shutdown(&self) {
        if !self.draining.swap(true, Ordering::SeqCst) {
            tracing::info!(component = %self.name, "draining, readiness now unavailable");
        }
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::SeqCst)
    }
}

impl Named for ShutdownGate {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl StatusProvider for ShutdownGate {
    async fn status(
        &self,
        _ctx: Option<&RequestContext>,
    ) -> Result<Option<StatusReport>, ProviderError> {
        Ok(Some(StatusReport::ok()))
    }
}

impl ReadinessProvider for ShutdownGate {
    fn ready(&self) -> Result<Option<StatusReport>, ProviderError> {
        if self.is_draining() {
            return Ok(None);
        }
        Ok(Some(StatusReport::ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_until_shutdown_then_unavailable() {
        let gate = ShutdownGate::new("vigil");
        assert_eq!(gate.ready().unwrap(), Some(StatusReport::ok()));

        gate.begin_shutdown();
        gate.begin_shutdown();

        assert!(gate.is_draining());
        assert_eq!(gate.ready().unwrap(), None);
        // still alive while draining
        assert_eq!(gate.status(None).await.unwrap(), Some(StatusReport::ok()));
    }
}
