/// Failure raised by a provider while producing a report.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ProviderError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Reasons an aggregation is aborted without producing a report.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("component {name} failed: {source}")]
    Provider {
        name: String,
        #[source]
        source: ProviderError,
    },

    #[error("readiness check for {name} was interrupted")]
    Interrupted { name: String },
}
