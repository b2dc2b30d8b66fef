use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use mobilab_database::TransportMode;

use crate::{services::transport_modes as transport_mode_service, ApiError, AppState};

#[derive(Debug, Serialize, ToSchema)]
pub struct TransportModesResponse {
    pub success: bool,
    pub data: Vec<TransportMode>,
}

#[utoipa::path(
    get,
    path = "/api/v1/transport-modes",
    tag = "Transport Modes",
    responses(
        (status = 200, description = "All transport modes", body = TransportModesResponse),
        (status = 500, description = "Failed to fetch transport modes", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_transport_modes(
    State(state): State<AppState>,
) -> Result<Json<TransportModesResponse>, ApiError> {
    let modes = transport_mode_service::get_all(state.db_pool()).await?;
    Ok(Json(TransportModesResponse {
        success: true,
        data: modes,
    }))
}
