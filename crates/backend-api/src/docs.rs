use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::labs::get_labs,
        crate::routes::labs_projects::get_lab,
        crate::routes::labs_projects::upsert_lab_project,
        crate::routes::labs_projects::delete_lab_project,
        crate::routes::labs_transport_modes::upsert_lab_transport_mode,
        crate::routes::labs_transport_modes::delete_lab_transport_mode,
        crate::routes::projects::get_projects,
        crate::routes::transport_modes::get_transport_modes,
        crate::routes::categories::get_categories,
        crate::routes::kpi_definitions::get_kpi_definitions,
        crate::routes::kpi_results::upsert_kpi_result,
        crate::routes::kpi_results::delete_kpi_result,
        crate::routes::users::get_users,
        crate::routes::signup_editor::signup_editor
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::labs::LabsData,
            crate::routes::labs::LabsResponse,
            crate::routes::labs_projects::LabProjectBody,
            crate::routes::labs_projects::LabResponse,
            crate::routes::labs_projects::LabProjectResponse,
            crate::routes::labs_transport_modes::LabTransportModeBody,
            crate::routes::labs_transport_modes::LabTransportModeResponse,
            crate::routes::projects::ProjectsResponse,
            crate::routes::transport_modes::TransportModesResponse,
            crate::routes::categories::CategoriesResponse,
            crate::routes::kpi_definitions::KpiDefinitionsResponse,
            crate::routes::kpi_results::KpiResultResponse,
            crate::routes::kpi_results::DeleteKpiResultBody,
            crate::routes::users::UsersResponse,
            crate::routes::signup_editor::SignupEditorResponse,
            crate::services::signup::SignupEditorRequest,
            mobilab_database::Lab,
            mobilab_database::UpdateLabRequest,
            mobilab_database::PopulatedLab,
            mobilab_database::LabProjectImplementation,
            mobilab_database::LabTransportModeImplementation,
            mobilab_database::Project,
            mobilab_database::ProjectType,
            mobilab_database::TransportMode,
            mobilab_database::TransportModeType,
            mobilab_database::TransportModeStatus,
            mobilab_database::KpiDefinition,
            mobilab_database::KpiType,
            mobilab_database::KpiMetric,
            mobilab_database::KpiResult,
            mobilab_database::KpiResultInput,
            mobilab_database::KpiResultBeforeAfter,
            mobilab_database::Category,
            mobilab_database::PopulatedCategory,
            mobilab_database::User,
            mobilab_database::Role,
            mobilab_database::LabSummary,
            mobilab_database::UserStatus
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Labs", description = "Living lab profiles and populated dashboards"),
        (name = "Lab Projects", description = "Measures implemented by a lab"),
        (name = "Lab Transport Modes", description = "Transport modes offered by a lab"),
        (name = "Projects", description = "Mobility measure catalogue"),
        (name = "Transport Modes", description = "Transport mode catalogue"),
        (name = "Categories", description = "KPI category groupings"),
        (name = "KPI Definitions", description = "Indicator definitions and hierarchy"),
        (name = "KPI Results", description = "Measured indicator values"),
        (name = "Users", description = "Account lookup and filtering"),
        (name = "Signup", description = "Editor self-signup")
    )
)]
pub struct ApiDoc;

/// Raw OpenAPI document, consumed by external viewers.
pub async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/labs"));
        assert!(doc.paths.paths.contains_key("/api/v1/signup-editor"));
    }
}
