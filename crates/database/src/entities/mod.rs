//! Entity definitions for the Mobilab schema.

pub mod category;
pub mod kpi;
pub mod lab;
pub mod project;
pub mod transport_mode;
pub mod user;

pub use category::{Category, PopulatedCategory};
pub use kpi::{
    KpiDefinition, KpiMetric, KpiResult, KpiResultBeforeAfter, KpiResultInput, KpiType,
};
pub use lab::{
    Lab, LabProjectImplementation, LabTransportModeImplementation, PopulatedLab, UpdateLabRequest,
};
pub use project::{Project, ProjectType, UpdateProjectRequest};
pub use transport_mode::{
    TransportMode, TransportModeStatus, TransportModeType, UpdateTransportModeRequest,
};
pub use user::{CreateUserRequest, LabSummary, Role, UpdateUserRequest, User, UserStatus};
