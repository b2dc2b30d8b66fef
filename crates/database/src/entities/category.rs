//! Category entity definitions. Categories group KPI definitions for
//! dashboard display.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::kpi::KpiDefinition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
}

/// Category with its member KPI definitions attached.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PopulatedCategory {
    #[serde(flatten)]
    pub category: Category,
    pub kpis: Vec<KpiDefinition>,
}
