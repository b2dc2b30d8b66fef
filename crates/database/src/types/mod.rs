//! Shared types and result aliases for the persistence layer.

pub mod errors;

pub use errors::{DatabaseError, KpiError, LabError, UserError};

pub type DatabaseResult<T> = Result<T, DatabaseError>;
pub type LabResult<T> = Result<T, LabError>;
pub type UserResult<T> = Result<T, UserError>;
