use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use vigil_core::StatusService;

use crate::{docs, handlers, rpc};

/// Shared state handed to every handler. Cloning is cheap: the registry sits
/// behind an `Arc` inside the service.
#[derive(Clone)]
pub struct AppState {
    pub service: StatusService,
    pub unavailable_status_code: StatusCode,
}

impl AppState {
    pub fn new(service: StatusService, unavailable_status_code: StatusCode) -> Self {
        Self {
            service,
            unavailable_status_code,
        }
    }
}

/// Builds the full router. `/metrics` is only mounted when a recorder was installed.
pub fn router(
    state: AppState,
    metrics: Option<PrometheusHandle>,
    request_timeout: Duration,
) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route("/rpc/status/:name", get(rpc::status))
        .route("/rpc/ready/:name", get(rpc::ready))
        .route("/api-docs/openapi.json", get(docs::openapi_json));

    if let Some(handle) = metrics {
        app = app.route(
            "/metrics",
            get(move || {
                let rendered = handle.render();
                async move { rendered }
            }),
        );
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(request_timeout)),
    )
    .with_state(state)
}
