use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use mobilab_database::User;

use crate::{
    services::users::{self as user_service, UserFilter},
    ApiError, AppState,
};

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    pub id: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub role_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub success: bool,
    pub data: Vec<User>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(
        ("id" = Option<String>, Query, description = "Fetch a single user by id"),
        ("email" = Option<String>, Query, description = "Fetch a single user by email"),
        ("status" = Option<String>, Query, description = "Filter by account status"),
        ("role_id" = Option<String>, Query, description = "Filter by role")
    ),
    responses(
        (status = 200, description = "Matching users", body = UsersResponse),
        (status = 400, description = "Malformed filter value", body = crate::error::ErrorResponse),
        (status = 404, description = "No users found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<UsersResponse>, ApiError> {
    let mut filter = UserFilter {
        email: query.email,
        ..Default::default()
    };

    if let Some(raw) = &query.id {
        filter.id = Some(
            raw.parse()
                .map_err(|_| ApiError::bad_request("Invalid user ID format"))?,
        );
    }
    if let Some(raw) = &query.status {
        filter.status = Some(
            raw.parse()
                .map_err(|_| ApiError::bad_request("Invalid user status"))?,
        );
    }
    if let Some(raw) = &query.role_id {
        filter.role_id = Some(
            raw.parse()
                .map_err(|_| ApiError::bad_request("Invalid role ID format"))?,
        );
    }

    let users = user_service::find(state.db_pool(), &filter).await?;
    if users.is_empty() {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(Json(UsersResponse {
        success: true,
        data: users,
    }))
}
