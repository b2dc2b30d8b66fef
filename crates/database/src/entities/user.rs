//! User and role entity definitions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Minimal lab reference attached to a user for lab selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct LabSummary {
    pub id: i64,
    pub name: String,
}

/// Safe user view: never carries the stored password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub picture: Option<String>,
    pub role_id: i64,
    pub status: UserStatus,
    pub created_at: String,
    pub role: Option<Role>,
    pub labs: Vec<LabSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub password_confirmation: Option<String>,
    pub phone: Option<String>,
    pub picture: Option<String>,
    pub role_id: i64,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub old_password: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub phone: Option<String>,
    pub picture: Option<String>,
    pub role_id: Option<i64>,
    pub status: Option<UserStatus>,
    pub living_lab_id: Option<i64>,
}

/// Account lifecycle: freshly signed-up accounts wait for validation,
/// disabled is the soft-delete state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserStatus {
    Signup,
    Active,
    Disabled,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Signup => "signup",
            UserStatus::Active => "active",
            UserStatus::Disabled => "disabled",
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(UserStatus::Signup),
            "active" => Ok(UserStatus::Active),
            "disabled" => Ok(UserStatus::Disabled),
            other => Err(format!("unknown user status: {other}")),
        }
    }
}
