use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use mobilab_database::{LabTransportModeImplementation, TransportModeStatus};

use crate::{services::labs as lab_service, ApiError, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LabTransportModeBody {
    pub living_lab_id: Option<i64>,
    pub transport_mode_id: Option<i64>,
    pub status: Option<TransportModeStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LabTransportModeResponse {
    pub success: bool,
    pub data: LabTransportModeImplementation,
}

fn require(id: Option<i64>, message: &str) -> Result<i64, ApiError> {
    id.ok_or_else(|| ApiError::bad_request(message))
}

#[utoipa::path(
    put,
    path = "/api/v1/labs-transport-modes",
    tag = "Lab Transport Modes",
    request_body = LabTransportModeBody,
    responses(
        (status = 200, description = "Implementation upserted", body = LabTransportModeResponse),
        (status = 400, description = "Missing lab or transport mode id", body = crate::error::ErrorResponse)
    )
)]
pub async fn upsert_lab_transport_mode(
    State(state): State<AppState>,
    Json(body): Json<LabTransportModeBody>,
) -> Result<Json<LabTransportModeResponse>, ApiError> {
    let lab_id = require(body.living_lab_id, "living_lab_id is required")?;
    let transport_mode_id = require(body.transport_mode_id, "transport_mode_id is required")?;

    let implementation = lab_service::upsert_transport_mode_implementation(
        state.db_pool(),
        lab_id,
        transport_mode_id,
        body.status.unwrap_or_default(),
    )
    .await?;

    Ok(Json(LabTransportModeResponse {
        success: true,
        data: implementation,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/labs-transport-modes",
    tag = "Lab Transport Modes",
    request_body = LabTransportModeBody,
    responses(
        (status = 204, description = "Implementation removed"),
        (status = 400, description = "Missing lab or transport mode id", body = crate::error::ErrorResponse),
        (status = 404, description = "Implementation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_lab_transport_mode(
    State(state): State<AppState>,
    Json(body): Json<LabTransportModeBody>,
) -> Result<StatusCode, ApiError> {
    let lab_id = require(body.living_lab_id, "living_lab_id is required")?;
    let transport_mode_id = require(body.transport_mode_id, "transport_mode_id is required")?;

    lab_service::delete_transport_mode_implementation(state.db_pool(), lab_id, transport_mode_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
