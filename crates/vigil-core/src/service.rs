use std::sync::Arc;

use crate::{
    AggregateError, AggregateResult, Capability, ComponentRegistry, ProviderError, RegistryError,
    RequestContext, StatusReport, aggregate,
};

/// Errors from single-component lookups.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("readiness check for {0} was interrupted")]
    Interrupted(String),
}

/// Entry point shared by the HTTP endpoints and the side-channel.
#[derive(Clone)]
pub struct StatusService {
    registry: Arc<ComponentRegistry>,
}

impl StatusService {
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self { registry }
    }

    pub async fn aggregate(
        &self,
        capability: Capability,
        names: &[String],
        ctx: Option<&RequestContext>,
    ) -> Result<AggregateResult, AggregateError> {
        aggregate(&self.registry, capability, names, ctx).await
    }

    /// Current status of one component, queried without a request context.
    pub async fn status(&self, name: &str) -> Result<Option<StatusReport>, LookupError> {
        let provider = self
            .registry
            .status(name)
            .ok_or_else(|| RegistryError::ComponentNotFound(name.to_string()))?;
        Ok(provider.status(None).await?)
    }

    /// Current readiness of one component, checked on the blocking pool.
    pub async fn ready(&self, name: &str) -> Result<Option<StatusReport>, LookupError> {
        let provider = self
            .registry
            .ready(name)
            .ok_or_else(|| RegistryError::ComponentNotFound(name.to_string()))?;
        tokio::task::spawn_blocking(move || provider.ready())
            .await
            .map_err(|_| LookupError::Interrupted(name.to_string()))?
            .map_err(LookupError::from)
    }
}
