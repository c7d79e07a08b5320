//! Single-component side-channel for tooling.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vigil_core::StatusReport;

use crate::{ApiError, AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RpcReply {
    pub name: String,
    /// `null` when the component is present but unavailable.
    pub report: Option<StatusReport>,
}

#[utoipa::path(
    get,
    path = "/rpc/status/{name}",
    params(("name" = String, Path, description = "Component name")),
    responses(
        (status = 200, description = "Current status", body = RpcReply),
        (status = 404, description = "No such component"),
        (status = 500, description = "Component failed to report")
    )
)]
pub async fn status(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RpcReply>, ApiError> {
    let report = state.service.status(&name).await?;
    Ok(Json(RpcReply { name, report }))
}

#[utoipa::path(
    get,
    path = "/rpc/ready/{name}",
    params(("name" = String, Path, description = "Component name")),
    responses(
        (status = 200, description = "Current readiness", body = RpcReply),
        (status = 404, description = "No such component"),
        (status = 500, description = "Component failed to report")
    )
)]
pub async fn ready(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RpcReply>, ApiError> {
    let report = state.service.ready(&name).await?;
    Ok(Json(RpcReply { name, report }))
}
