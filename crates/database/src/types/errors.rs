//! Error types for the persistence layer.

use thiserror::Error;

/// Infrastructure-level database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// Errors surfaced by the living-lab repositories.
#[derive(Debug, Error)]
pub enum LabError {
    #[error("Living lab not found")]
    LabNotFound,

    #[error("Project not found")]
    ProjectNotFound,

    #[error("Transport mode not found")]
    TransportModeNotFound,

    #[error("Implementation not found")]
    ImplementationNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Errors surfaced by the KPI repositories.
#[derive(Debug, Error)]
pub enum KpiError {
    #[error("KPI definition not found")]
    DefinitionNotFound,

    #[error("KPI result not found")]
    ResultNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Errors surfaced by the user repository.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for LabError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<sqlx::Error> for KpiError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<sqlx::Error> for UserError {
    fn from(err: sqlx::Error) -> Self {
        if err.to_string().contains("UNIQUE constraint failed")
            && err.to_string().contains("email")
        {
            Self::EmailAlreadyExists
        } else {
            Self::DatabaseError(err.to_string())
        }
    }
}
