//! KPI definition and result entity definitions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A tracked indicator. Definitions form a hierarchy through
/// `parent_kpi_id` (e.g. modal-split sub-indicators under `15`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct KpiDefinition {
    pub id: i64,
    pub kpi_number: String,
    pub parent_kpi_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub disclaimer: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: KpiType,
    pub progression_target: f64,
    pub metric: KpiMetric,
    pub metric_description: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

/// A single measured value for a lab + KPI + optional transport mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct KpiResult {
    pub id: i64,
    pub kpi_definition_id: i64,
    pub living_lab_id: i64,
    pub transport_mode_id: Option<i64>,
    pub value: f64,
    pub date: String,
}

/// Upsert payload for a KPI result. An existing row is updated when `id`
/// is present and resolves; otherwise a new row is inserted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct KpiResultInput {
    pub id: Option<i64>,
    pub kpi_definition_id: Option<i64>,
    pub living_lab_id: Option<i64>,
    pub transport_mode_id: Option<i64>,
    pub value: Option<f64>,
    pub date: Option<String>,
}

/// Earliest/latest measurement pair for one (KPI, transport mode) key.
/// `result_after` is `None` when only a single measurement exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KpiResultBeforeAfter {
    pub living_lab_id: i64,
    pub kpi_definition_id: i64,
    pub transport_mode_id: Option<i64>,
    pub result_before: Option<KpiResult>,
    pub result_after: Option<KpiResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum KpiType {
    Global,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum KpiMetric {
    Percentage,
    Ratio,
    Absolute,
    CustomUnit,
    Score,
    None,
}
