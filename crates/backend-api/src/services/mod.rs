pub mod categories;
pub mod error;
pub mod kpi_definitions;
pub mod kpi_results;
pub mod labs;
pub mod projects;
pub mod signup;
pub mod transport_modes;
pub mod users;

pub use error::*;
