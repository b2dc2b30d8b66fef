//! Mobilab database crate.
//!
//! Connection management, embedded migrations, the entity model and the
//! repository layer for the living-lab KPI dashboard.

use sqlx::SqlitePool;

use mobilab_config::DatabaseConfig;

pub mod aggregate;
pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use aggregate::pair_results;
pub use connection::prepare_database;
pub use migrations::{run_migrations, MIGRATOR};

// Re-export repositories
pub use repos::{
    CategoryRepository, KpiDefinitionRepository, KpiResultRepository, LabRepository,
    ProjectRepository, TransportModeRepository, UserRepository,
};

// Re-export entities
pub use entities::{
    Category, CreateUserRequest, KpiDefinition, KpiMetric, KpiResult, KpiResultBeforeAfter,
    KpiResultInput, KpiType, Lab, LabProjectImplementation, LabSummary,
    LabTransportModeImplementation, PopulatedCategory, PopulatedLab, Project, ProjectType, Role,
    TransportMode, TransportModeStatus, TransportModeType, UpdateLabRequest, UpdateProjectRequest,
    UpdateTransportModeRequest, UpdateUserRequest, User, UserStatus,
};

// Re-export types
pub use types::{
    errors::{DatabaseError, KpiError, LabError, UserError},
    DatabaseResult, LabResult, UserResult,
};

/// Connect and bring the schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}
