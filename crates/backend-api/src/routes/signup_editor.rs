use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use mobilab_database::User;

use crate::{
    services::signup::{self as signup_service, SignupEditorRequest},
    ApiError, AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupEditorResponse {
    pub success: bool,
    pub data: User,
}

#[utoipa::path(
    post,
    path = "/api/v1/signup-editor",
    tag = "Signup",
    request_body = SignupEditorRequest,
    responses(
        (status = 201, description = "Editor account created", body = SignupEditorResponse),
        (status = 400, description = "Invalid signup payload", body = crate::error::ErrorResponse),
        (status = 502, description = "Admin service failure", body = crate::error::ErrorResponse),
        (status = 503, description = "Admin service not configured", body = crate::error::ErrorResponse)
    )
)]
pub async fn signup_editor(
    State(state): State<AppState>,
    Json(request): Json<SignupEditorRequest>,
) -> Result<(StatusCode, Json<SignupEditorResponse>), ApiError> {
    let user = signup_service::create_editor(&state, &request).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupEditorResponse {
            success: true,
            data: user,
        }),
    ))
}
