//! Living-lab entity definitions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::kpi::KpiResultBeforeAfter;
use super::project::Project;
use super::transport_mode::{TransportMode, TransportModeStatus};

/// A city or region participating in the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Lab {
    pub id: i64,
    pub name: String,
    pub country: Option<String>,
    pub flag: Option<String>,
    pub description: Option<String>,
    pub area: Option<f64>,
    pub radius: Option<f64>,
    pub population: Option<i64>,
    pub country_code2: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial payload used for both creation and update of a lab.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateLabRequest {
    pub name: Option<String>,
    pub country: Option<String>,
    pub flag: Option<String>,
    pub description: Option<String>,
    pub area: Option<f64>,
    pub radius: Option<f64>,
    pub population: Option<i64>,
    pub country_code2: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Lab view model with its relations resolved: implemented measures,
/// transport modes, and KPI results folded into before/after pairs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PopulatedLab {
    #[serde(flatten)]
    pub lab: Lab,
    pub projects: Vec<Project>,
    pub transport_modes: Vec<TransportMode>,
    pub kpi_results: Vec<KpiResultBeforeAfter>,
}

/// A measure implemented by a lab (row of the lab/project join table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct LabProjectImplementation {
    pub id: i64,
    pub living_lab_id: i64,
    pub project_id: i64,
    pub start_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A transport mode offered by a lab (row of the lab/transport-mode join table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct LabTransportModeImplementation {
    pub id: i64,
    pub living_lab_id: i64,
    pub transport_mode_id: i64,
    pub status: TransportModeStatus,
}
