//! Data access layer. One repository per aggregate, all backed by the
//! shared [`sqlx::SqlitePool`].

mod category_repository;
mod kpi_definition_repository;
mod kpi_result_repository;
mod lab_repository;
mod project_repository;
mod transport_mode_repository;
mod user_repository;

pub use category_repository::CategoryRepository;
pub use kpi_definition_repository::KpiDefinitionRepository;
pub use kpi_result_repository::KpiResultRepository;
pub use lab_repository::LabRepository;
pub use project_repository::ProjectRepository;
pub use transport_mode_repository::TransportModeRepository;
pub use user_repository::UserRepository;
