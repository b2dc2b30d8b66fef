use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use mobilab_database::{KpiResult, KpiResultInput};

use crate::{services::kpi_results as result_service, ApiError, AppState};

#[derive(Debug, Serialize, ToSchema)]
pub struct KpiResultResponse {
    pub success: bool,
    pub data: KpiResult,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteKpiResultBody {
    pub id: Option<i64>,
}

#[utoipa::path(
    put,
    path = "/api/v1/kpiresults",
    tag = "KPI Results",
    request_body = KpiResultInput,
    responses(
        (status = 200, description = "Result upserted", body = KpiResultResponse),
        (status = 400, description = "Missing required fields", body = crate::error::ErrorResponse),
        (status = 500, description = "Failed to upsert result", body = crate::error::ErrorResponse)
    )
)]
pub async fn upsert_kpi_result(
    State(state): State<AppState>,
    Json(input): Json<KpiResultInput>,
) -> Result<Json<KpiResultResponse>, ApiError> {
    let result = result_service::upsert(state.db_pool(), &input).await?;
    Ok(Json(KpiResultResponse {
        success: true,
        data: result,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/kpiresults",
    tag = "KPI Results",
    request_body = DeleteKpiResultBody,
    responses(
        (status = 204, description = "Result deleted"),
        (status = 400, description = "Missing id", body = crate::error::ErrorResponse),
        (status = 404, description = "Result not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_kpi_result(
    State(state): State<AppState>,
    Json(body): Json<DeleteKpiResultBody>,
) -> Result<StatusCode, ApiError> {
    let id = body
        .id
        .ok_or_else(|| ApiError::bad_request("Provide the id of the KPI result to delete"))?;

    if !result_service::delete(state.db_pool(), id).await? {
        return Err(ApiError::not_found("KPI result not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
