//! Editor self-signup. Account creation is delegated to the external
//! admin application, which writes into the shared database; the lab
//! relation and optional auto-activation happen locally afterwards.

use mobilab_database::{CreateUserRequest, User, UserRepository, UserStatus};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use super::error::ServiceError;
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupEditorRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: Option<String>,
    pub living_lab_id: Option<i64>,
}

pub async fn create_editor(
    state: &AppState,
    request: &SignupEditorRequest,
) -> Result<User, ServiceError> {
    let admin = state.admin();
    let host = admin
        .host
        .as_deref()
        .ok_or_else(|| ServiceError::config("Admin API host is not configured"))?;
    let api_key = admin
        .user_creation_api_key
        .as_deref()
        .ok_or_else(|| ServiceError::config("User creation API key is not configured"))?;

    let payload = CreateUserRequest {
        email: request.email.trim().to_lowercase(),
        name: request.name.trim().to_string(),
        password: request.password.clone(),
        password_confirmation: request.password_confirmation.clone(),
        phone: None,
        picture: None,
        role_id: admin.signup_editor_role_id,
        status: None,
    };
    super::users::validate_create(&payload)?;

    let url = format!("{}/api/users", host.trim_end_matches('/'));
    let response = state
        .http()
        .post(&url)
        .header("X-User-Creation-Key", api_key)
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::AdminApi(format!(
            "Admin API error ({status}): {body}"
        )));
    }

    let user: User = response
        .json()
        .await
        .map_err(|e| ServiceError::AdminApi(format!("Unexpected admin API response: {e}")))?;
    info!(user_id = user.id, "editor account created via admin api");

    let repo = UserRepository::new(state.db_pool().clone());
    if let Some(lab_id) = request.living_lab_id {
        repo.set_living_lab(user.id, lab_id).await?;

        if admin.signup_auto_activate {
            if let Some(activated) = activate_if_sole_editor(&repo, &user, lab_id, admin.signup_editor_role_id).await? {
                return Ok(activated);
            }
        }
    }

    Ok(repo.find_by_id(user.id).await?.unwrap_or(user))
}

/// A lab's first editor can start working right away; further signups
/// stay pending until an admin validates them.
async fn activate_if_sole_editor(
    repo: &UserRepository,
    user: &User,
    lab_id: i64,
    role_id: i64,
) -> Result<Option<User>, ServiceError> {
    let active_editors = repo
        .find_by_role_lab_status(role_id, lab_id, UserStatus::Active)
        .await?;
    if !active_editors.iter().any(|u| u.id != user.id) {
        let activated = repo
            .update(
                user.id,
                &mobilab_database::UpdateUserRequest {
                    status: Some(UserStatus::Active),
                    ..Default::default()
                },
            )
            .await?;
        info!(user_id = user.id, lab_id, "auto-activated first editor");
        return Ok(Some(activated));
    }
    Ok(None)
}
