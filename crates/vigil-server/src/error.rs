use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use vigil_core::{AggregateError, LookupError, RegistryError};
use vigil_probes::ProbeError;

use crate::ConfigError;

/// Startup and listener failures.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("probe setup failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request failures rendered as plain-text responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Lookup(LookupError::Registry(RegistryError::ComponentNotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
