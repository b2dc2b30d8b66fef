use axum::http::StatusCode;
use mobilab_database::{KpiError, LabError, UserError};
use thiserror::Error;

use crate::ApiError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal error: {0}")]
    Internal(String),
    /// Failure talking to the external admin service during signup.
    #[error("Admin API error: {0}")]
    AdminApi(String),
}

impl ServiceError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::BadRequest(msg) => ApiError::bad_request(msg),
            ServiceError::Database(db_err) => {
                tracing::error!("database error: {}", db_err);
                ApiError::internal_server_error("Database operation failed")
            }
            ServiceError::Config(msg) => {
                tracing::error!("configuration error: {}", msg);
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, msg)
            }
            ServiceError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                ApiError::internal_server_error(msg)
            }
            ServiceError::AdminApi(msg) => {
                tracing::error!("admin api error: {}", msg);
                ApiError::new(StatusCode::BAD_GATEWAY, msg)
            }
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<LabError> for ServiceError {
    fn from(err: LabError) -> Self {
        match err {
            LabError::LabNotFound
            | LabError::ProjectNotFound
            | LabError::TransportModeNotFound
            | LabError::ImplementationNotFound => Self::NotFound(err.to_string()),
            LabError::DatabaseError(db_err) => Self::Database(db_err),
        }
    }
}

impl From<KpiError> for ServiceError {
    fn from(err: KpiError) -> Self {
        match err {
            KpiError::DefinitionNotFound | KpiError::ResultNotFound => {
                Self::NotFound(err.to_string())
            }
            KpiError::DatabaseError(db_err) => Self::Database(db_err),
        }
    }
}

impl From<UserError> for ServiceError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UserNotFound => Self::NotFound(err.to_string()),
            UserError::EmailAlreadyExists => Self::BadRequest(err.to_string()),
            UserError::DatabaseError(db_err) => Self::Database(db_err),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::AdminApi(err.to_string())
    }
}
