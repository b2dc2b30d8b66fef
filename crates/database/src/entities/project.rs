//! Mobility measure ("project") entity definitions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A mobility intervention piloted by one or more labs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: ProjectType,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ProjectType>,
    pub image_url: Option<String>,
}

/// Measure classification: PUSH discourages car use, PULL promotes
/// alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum ProjectType {
    Push,
    Pull,
    Other,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Push => "PUSH",
            ProjectType::Pull => "PULL",
            ProjectType::Other => "OTHER",
        }
    }
}
