use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use mobilab_database::Project;

use crate::{services::projects as project_service, ApiError, AppState};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectsResponse {
    pub success: bool,
    pub data: Vec<Project>,
}

#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "All measures", body = ProjectsResponse),
        (status = 500, description = "Failed to fetch measures", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_projects(
    State(state): State<AppState>,
) -> Result<Json<ProjectsResponse>, ApiError> {
    let projects = project_service::get_all(state.db_pool()).await?;
    Ok(Json(ProjectsResponse {
        success: true,
        data: projects,
    }))
}
