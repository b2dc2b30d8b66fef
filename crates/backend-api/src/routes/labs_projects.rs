use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use mobilab_database::{Lab, LabProjectImplementation};

use crate::{services::labs as lab_service, util::selected_lab, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct LabProjectsQuery {
    pub lab_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LabProjectBody {
    pub lab_id: Option<i64>,
    pub project_id: Option<i64>,
    /// Date the measure went live in the lab.
    pub start_at: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LabResponse {
    pub success: bool,
    pub data: Lab,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LabProjectResponse {
    pub success: bool,
    pub data: LabProjectImplementation,
}

fn require(id: Option<i64>, message: &str) -> Result<i64, ApiError> {
    id.ok_or_else(|| ApiError::bad_request(message))
}

#[utoipa::path(
    get,
    path = "/api/v1/labs-projects",
    tag = "Lab Projects",
    params(("lab_id" = Option<i64>, Query, description = "Lab to look up; falls back to the livingLab cookie")),
    responses(
        (status = 200, description = "Lab fetched", body = LabResponse),
        (status = 404, description = "No lab found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_lab(
    State(state): State<AppState>,
    Query(query): Query<LabProjectsQuery>,
    headers: HeaderMap,
) -> Result<Json<LabResponse>, ApiError> {
    let lab_id = query
        .lab_id
        .or_else(|| selected_lab(&headers).map(|lab| lab.id))
        .unwrap_or(0);
    let lab = lab_service::get_by_id(state.db_pool(), lab_id).await?;
    Ok(Json(LabResponse {
        success: true,
        data: lab,
    }))
}

#[utoipa::path(
    put,
    path = "/api/v1/labs-projects",
    tag = "Lab Projects",
    request_body = LabProjectBody,
    responses(
        (status = 200, description = "Implementation upserted", body = LabProjectResponse),
        (status = 400, description = "Missing lab or project id", body = crate::error::ErrorResponse)
    )
)]
pub async fn upsert_lab_project(
    State(state): State<AppState>,
    Json(body): Json<LabProjectBody>,
) -> Result<Json<LabProjectResponse>, ApiError> {
    let lab_id = require(body.lab_id, "lab_id is required")?;
    let project_id = require(body.project_id, "project_id is required")?;

    let implementation = lab_service::upsert_project_implementation(
        state.db_pool(),
        lab_id,
        project_id,
        body.start_at.as_deref(),
    )
    .await?;

    Ok(Json(LabProjectResponse {
        success: true,
        data: implementation,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/labs-projects",
    tag = "Lab Projects",
    request_body = LabProjectBody,
    responses(
        (status = 204, description = "Implementation removed"),
        (status = 400, description = "Missing lab or project id", body = crate::error::ErrorResponse),
        (status = 404, description = "Implementation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_lab_project(
    State(state): State<AppState>,
    Json(body): Json<LabProjectBody>,
) -> Result<StatusCode, ApiError> {
    let lab_id = require(body.lab_id, "lab_id is required")?;
    let project_id = require(body.project_id, "project_id is required")?;

    lab_service::delete_project_implementation(state.db_pool(), lab_id, project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
