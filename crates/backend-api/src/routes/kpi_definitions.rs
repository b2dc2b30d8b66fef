use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use mobilab_database::KpiDefinition;

use crate::{services::kpi_definitions as definition_service, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct KpiDefinitionsQuery {
    pub kpi_number: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KpiDefinitionsResponse {
    pub success: bool,
    pub data: Vec<KpiDefinition>,
}

#[utoipa::path(
    get,
    path = "/api/v1/kpidefinitions",
    tag = "KPI Definitions",
    params(("kpi_number" = Option<String>, Query, description = "Resolve one definition and its children")),
    responses(
        (status = 200, description = "KPI definitions", body = KpiDefinitionsResponse),
        (status = 500, description = "Failed to fetch definitions", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_kpi_definitions(
    State(state): State<AppState>,
    Query(query): Query<KpiDefinitionsQuery>,
) -> Result<Json<KpiDefinitionsResponse>, ApiError> {
    let definitions =
        definition_service::get_all(state.db_pool(), query.kpi_number.as_deref()).await?;
    Ok(Json(KpiDefinitionsResponse {
        success: true,
        data: definitions,
    }))
}
