use async_trait::async_trait;

use crate::{ProviderError, RequestContext, StatusReport};

/// Registration key shared by both capabilities.
pub trait Named {
    fn name(&self) -> &str;
}

/// A component that can report its general health.
///
/// `ctx` is `None` when queried through the side-channel and carries the
/// triggering request when queried through `/health`.
///
/// `Ok(None)` means the component exists but is currently unavailable.
#[async_trait]
pub trait StatusProvider: Named + Send + Sync {
    async fn status(
        &self,
        ctx: Option<&RequestContext>,
    ) -> Result<Option<StatusReport>, ProviderError>;
}

/// A component that can report whether it has capacity to accept work now.
///
/// Takes no request context: readiness checks run to completion on the
/// blocking pool and may block.
pub trait ReadinessProvider: Named + Send + Sync {
    fn ready(&self) -> Result<Option<StatusReport>, ProviderError>;
}
