use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use mobilab_database::{Lab, PopulatedLab};

use crate::{services::labs as lab_service, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct LabsQuery {
    pub id: Option<String>,
    pub fields: Option<String>,
}

/// One lab or many, with or without relations, depending on the query.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LabsData {
    Lab(Lab),
    Labs(Vec<Lab>),
    PopulatedLab(Box<PopulatedLab>),
    PopulatedLabs(Vec<PopulatedLab>),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LabsResponse {
    pub success: bool,
    pub data: LabsData,
}

#[utoipa::path(
    get,
    path = "/api/v1/labs",
    tag = "Labs",
    params(
        ("id" = Option<String>, Query, description = "Fetch a single lab by id"),
        ("fields" = Option<String>, Query, description = "Comma-separated relations to include, e.g. projects,transport_modes")
    ),
    responses(
        (status = 200, description = "Lab data fetched", body = LabsResponse),
        (status = 400, description = "Malformed lab id", body = crate::error::ErrorResponse),
        (status = 404, description = "No labs found", body = crate::error::ErrorResponse),
        (status = 500, description = "Failed to fetch labs", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_labs(
    State(state): State<AppState>,
    Query(query): Query<LabsQuery>,
) -> Result<Json<LabsResponse>, ApiError> {
    let populate = query
        .fields
        .as_deref()
        .is_some_and(|fields| !fields.is_empty());

    let data = match &query.id {
        Some(raw) => {
            let id: i64 = raw
                .parse()
                .map_err(|_| ApiError::bad_request("Invalid lab ID format"))?;
            if populate {
                LabsData::PopulatedLab(Box::new(
                    lab_service::get_populated_by_id(state.db_pool(), id).await?,
                ))
            } else {
                LabsData::Lab(lab_service::get_by_id(state.db_pool(), id).await?)
            }
        }
        None => {
            if populate {
                let labs = lab_service::get_all_populated(state.db_pool()).await?;
                if labs.is_empty() {
                    return Err(ApiError::not_found("No labs found"));
                }
                LabsData::PopulatedLabs(labs)
            } else {
                let labs = lab_service::get_all(state.db_pool()).await?;
                if labs.is_empty() {
                    return Err(ApiError::not_found("No labs found"));
                }
                LabsData::Labs(labs)
            }
        }
    };

    Ok(Json(LabsResponse {
        success: true,
        data,
    }))
}
