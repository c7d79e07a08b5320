//! `/health` and `/ready`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};
use vigil_core::{Capability, Outcome, RequestContext};

use crate::{ApiError, AppState, telemetry};

/// Query key carrying the requested component names.
pub const PLUGIN_PARAM: &str = "plugin";

pub fn usage(capability: Capability) -> String {
    format!(
        "No plugins provided in query. Query should be in form of: {}?plugin=plugin1&plugin=plugin2 \n",
        capability.route()
    )
}

/// Aggregated health of the requested components.
#[utoipa::path(
    get,
    path = "/health",
    params(("plugin" = Vec<String>, Query, description = "Component name, repeat for more")),
    responses(
        (status = 200, description = "Every requested component is fine or unknown", body = String, content_type = "text/plain"),
        (status = 400, description = "No plugin parameter given", body = String, content_type = "text/plain"),
        (status = 503, description = "A component is unavailable (code is configurable)", body = String, content_type = "text/plain"),
        (status = 500, description = "A component failed to report")
    )
)]
pub async fn health(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    respond(&state, Capability::Status, params).await
}

/// Aggregated readiness of the requested components.
#[utoipa::path(
    get,
    path = "/ready",
    params(("plugin" = Vec<String>, Query, description = "Component name, repeat for more")),
    responses(
        (status = 200, description = "Every requested component is ready or unknown", body = String, content_type = "text/plain"),
        (status = 400, description = "No plugin parameter given", body = String, content_type = "text/plain"),
        (status = 503, description = "A component cannot take work (code is configurable)", body = String, content_type = "text/plain"),
        (status = 500, description = "A component failed to report")
    )
)]
pub async fn ready(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    respond(&state, Capability::Readiness, params).await
}

async fn respond(
    state: &AppState,
    capability: Capability,
    params: Vec<(String, String)>,
) -> Result<Response, ApiError> {
    let names: Vec<String> = params
        .into_iter()
        .filter(|(key, _)| key == PLUGIN_PARAM)
        .map(|(_, value)| value)
        .collect();

    let endpoint = capability.route();
    if names.is_empty() {
        telemetry::record_aggregation(endpoint, "bad_request", None);
        return Ok((StatusCode::BAD_REQUEST, usage(capability)).into_response());
    }

    let ctx = RequestContext::new(format!("/{endpoint}"));

    let result = match state.service.aggregate(capability, &names, Some(&ctx)).await {
        Ok(result) => result,
        Err(err) => {
            error!(request_id = %ctx.request_id, path = %ctx.path, error = %err, "aggregation aborted");
            telemetry::record_aggregation(endpoint, "error", Some(ctx.elapsed()));
            return Err(err.into());
        }
    };

    telemetry::record_aggregation(endpoint, result.outcome_label(), Some(ctx.elapsed()));

    if let Outcome::Unavailable { component, code } = &result.outcome {
        info!(
            request_id = %ctx.request_id,
            path = %ctx.path,
            %component,
            ?code,
            "short-circuited on unavailable component"
        );
    }

    let status = StatusCode::from_u16(result.http_code(state.unavailable_status_code.as_u16()))
        .unwrap_or(state.unavailable_status_code);

    Ok((status, result.render()).into_response())
}
