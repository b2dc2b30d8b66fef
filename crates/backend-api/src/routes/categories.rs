use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use mobilab_database::PopulatedCategory;

use crate::{services::categories as category_service, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    pub data: Vec<PopulatedCategory>,
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Categories",
    params(("type" = Option<String>, Query, description = "Filter categories by type")),
    responses(
        (status = 200, description = "Categories with their KPI definitions", body = CategoriesResponse),
        (status = 500, description = "Failed to fetch categories", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoriesQuery>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = category_service::get(state.db_pool(), query.kind.as_deref()).await?;
    Ok(Json(CategoriesResponse {
        success: true,
        data: categories,
    }))
}
