use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use crate::{ReadinessProvider, StatusProvider};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no such component: {0}")]
    ComponentNotFound(String),
}

/// Name to provider lookup for both capabilities.
///
/// Filled during bootstrap, read by every request afterwards. The two maps are
/// independent: a name registered for status is invisible to readiness.
#[derive(Default)]
pub struct ComponentRegistry {
    status: RwLock<HashMap<String, Arc<dyn StatusProvider>>>,
    ready: RwLock<HashMap<String, Arc<dyn ReadinessProvider>>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers under `provider.name()`; an earlier entry with the same name is replaced.
    pub fn register_status(&self, provider: Arc<dyn StatusProvider>) {
        let name = provider.name().to_string();
        debug!(component = %name, "registered status provider");
        self.status.write().insert(name, provider);
    }

    /// Registers under `provider.name()`; an earlier entry with the same name is replaced.
    pub fn register_ready(&self, provider: Arc<dyn ReadinessProvider>) {
        let name = provider.name().to_string();
        debug!(component = %name, "registered readiness provider");
        self.ready.write().insert(name, provider);
    }

    pub fn status(&self, name: &str) -> Option<Arc<dyn StatusProvider>> {
        self.status.read().get(name).cloned()
    }

    pub fn ready(&self, name: &str) -> Option<Arc<dyn ReadinessProvider>> {
        self.ready.read().get(name).cloned()
    }

    pub fn status_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.status.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn ready_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ready.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Named, ProviderError, RequestContext, StatusReport};
    use async_trait::async_trait;

    struct Fixed {
        name: &'static str,
        code: u16,
    }

    impl Named for Fixed {
        fn name(&self) -> &str {
            self.name
        }
    }

    #[async_trait]
    impl StatusProvider for Fixed {
        async fn status(
            &self,
            _ctx: Option<&RequestContext>,
        ) -> Result<Option<StatusReport>, ProviderError> {
            Ok(Some(StatusReport::new(self.code)))
        }
    }

    impl ReadinessProvider for Fixed {
        fn ready(&self) -> Result<Option<StatusReport>, ProviderError> {
            Ok(Some(StatusReport::new(self.code)))
        }
    }

    #[tokio::test]
    async fn lookup_returns_last_registration() {
        let registry = ComponentRegistry::new();
        registry.register_status(Arc::new(Fixed { name: "http", code: 200 }));
        registry.register_status(Arc::new(Fixed { name: "http", code: 201 }));

        let provider = registry.status("http").expect("registered");
        let report = provider.status(None).await.unwrap().unwrap();
        assert_eq!(report.code, 201);
    }

    #[test]
    fn status_and_readiness_are_separate() {
        let registry = ComponentRegistry::new();
        registry.register_ready(Arc::new(Fixed { name: "jobs", code: 200 }));

        assert!(registry.ready("jobs").is_some());
        assert!(registry.status("jobs").is_none());
        assert!(registry.ready("missing").is_none());
    }

    #[test]
    fn concurrent_registration_keeps_every_entry() {
        let registry = Arc::new(ComponentRegistry::new());
        let names: Vec<&'static str> = vec!["a", "b", "c", "d", "e", "f", "g", "h"];

        std::thread::scope(|scope| {
            for &name in &names {
                let registry = registry.clone();
                scope.spawn(move || {
                    registry.register_status(Arc::new(Fixed { name, code: 200 }));
                    registry.register_ready(Arc::new(Fixed { name, code: 200 }));
                });
            }
        });

        assert_eq!(registry.status_names(), names);
        assert_eq!(registry.ready_names(), names);
    }
}
