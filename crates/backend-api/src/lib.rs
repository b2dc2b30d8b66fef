mod docs;
mod error;
mod state;
mod util;

pub mod charts;
pub mod routes;
pub mod services;

pub use docs::ApiDoc;
pub use error::ApiError;
pub use state::AppState;
pub use util::{selected_lab, SelectedLab};

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/docs/openapi.json", get(docs::openapi_json))
        // Lab routes
        .route("/api/v1/labs", get(routes::labs::get_labs))
        .route("/api/v1/labs-projects", get(routes::labs_projects::get_lab))
        .route(
            "/api/v1/labs-projects",
            put(routes::labs_projects::upsert_lab_project),
        )
        .route(
            "/api/v1/labs-projects",
            delete(routes::labs_projects::delete_lab_project),
        )
        .route(
            "/api/v1/labs-transport-modes",
            put(routes::labs_transport_modes::upsert_lab_transport_mode),
        )
        .route(
            "/api/v1/labs-transport-modes",
            delete(routes::labs_transport_modes::delete_lab_transport_mode),
        )
        // Catalogue routes
        .route("/api/v1/projects", get(routes::projects::get_projects))
        .route(
            "/api/v1/transport-modes",
            get(routes::transport_modes::get_transport_modes),
        )
        .route(
            "/api/v1/categories",
            get(routes::categories::get_categories),
        )
        .route(
            "/api/v1/kpidefinitions",
            get(routes::kpi_definitions::get_kpi_definitions),
        )
        // KPI result routes
        .route(
            "/api/v1/kpiresults",
            put(routes::kpi_results::upsert_kpi_result),
        )
        .route(
            "/api/v1/kpiresults",
            delete(routes::kpi_results::delete_kpi_result),
        )
        // User routes
        .route("/api/v1/users", get(routes::users::get_users))
        .route(
            "/api/v1/signup-editor",
            post(routes::signup_editor::signup_editor),
        )
        .with_state(state)
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
