pub mod categories;
pub mod health;
pub mod kpi_definitions;
pub mod kpi_results;
pub mod labs;
pub mod labs_projects;
pub mod labs_transport_modes;
pub mod projects;
pub mod signup_editor;
pub mod transport_modes;
pub mod users;
