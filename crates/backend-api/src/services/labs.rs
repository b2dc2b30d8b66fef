use mobilab_database::{
    Lab, LabProjectImplementation, LabRepository, LabTransportModeImplementation, PopulatedLab,
    TransportModeStatus, UpdateLabRequest,
};
use sqlx::SqlitePool;

use super::error::ServiceError;

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Lab>, ServiceError> {
    Ok(LabRepository::new(pool.clone()).find_all().await?)
}

pub async fn get_all_populated(pool: &SqlitePool) -> Result<Vec<PopulatedLab>, ServiceError> {
    Ok(LabRepository::new(pool.clone()).find_all_populated().await?)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Lab, ServiceError> {
    require_positive(id, "lab")?;
    LabRepository::new(pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Lab not found"))
}

pub async fn get_populated_by_id(pool: &SqlitePool, id: i64) -> Result<PopulatedLab, ServiceError> {
    require_positive(id, "lab")?;
    LabRepository::new(pool.clone())
        .find_populated(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Lab not found"))
}

pub async fn create(pool: &SqlitePool, request: &UpdateLabRequest) -> Result<Lab, ServiceError> {
    validate_create(request)?;
    Ok(LabRepository::new(pool.clone()).create(request).await?)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    request: &UpdateLabRequest,
) -> Result<Lab, ServiceError> {
    require_positive(id, "lab")?;
    validate_update(request)?;

    let repo = LabRepository::new(pool.clone());
    if repo.find_by_id(id).await?.is_none() {
        return Err(ServiceError::not_found("Lab not found"));
    }
    Ok(repo.update(id, request).await?)
}

pub async fn upsert_project_implementation(
    pool: &SqlitePool,
    lab_id: i64,
    project_id: i64,
    start_at: Option<&str>,
) -> Result<LabProjectImplementation, ServiceError> {
    require_positive(lab_id, "lab")?;
    require_positive(project_id, "project")?;
    Ok(LabRepository::new(pool.clone())
        .upsert_project_implementation(lab_id, project_id, start_at)
        .await?)
}

pub async fn delete_project_implementation(
    pool: &SqlitePool,
    lab_id: i64,
    project_id: i64,
) -> Result<(), ServiceError> {
    require_positive(lab_id, "lab")?;
    require_positive(project_id, "project")?;
    Ok(LabRepository::new(pool.clone())
        .delete_project_implementation(lab_id, project_id)
        .await?)
}

pub async fn upsert_transport_mode_implementation(
    pool: &SqlitePool,
    lab_id: i64,
    transport_mode_id: i64,
    status: TransportModeStatus,
) -> Result<LabTransportModeImplementation, ServiceError> {
    require_positive(lab_id, "lab")?;
    require_positive(transport_mode_id, "transport mode")?;
    Ok(LabRepository::new(pool.clone())
        .upsert_transport_mode_implementation(lab_id, transport_mode_id, status)
        .await?)
}

pub async fn delete_transport_mode_implementation(
    pool: &SqlitePool,
    lab_id: i64,
    transport_mode_id: i64,
) -> Result<(), ServiceError> {
    require_positive(lab_id, "lab")?;
    require_positive(transport_mode_id, "transport mode")?;
    Ok(LabRepository::new(pool.clone())
        .delete_transport_mode_implementation(lab_id, transport_mode_id)
        .await?)
}

fn require_positive(id: i64, what: &str) -> Result<(), ServiceError> {
    if id <= 0 {
        return Err(ServiceError::bad_request(format!("Invalid {what} ID")));
    }
    Ok(())
}

fn validate_create(request: &UpdateLabRequest) -> Result<(), ServiceError> {
    match &request.name {
        Some(name) if name.trim().len() >= 2 => {}
        _ => {
            return Err(ServiceError::bad_request(
                "Name must be at least 2 characters long",
            ))
        }
    }
    validate_common(request)
}

fn validate_update(request: &UpdateLabRequest) -> Result<(), ServiceError> {
    if let Some(name) = &request.name {
        if name.trim().len() < 2 {
            return Err(ServiceError::bad_request(
                "Name must be at least 2 characters long",
            ));
        }
    }
    validate_common(request)
}

fn validate_common(request: &UpdateLabRequest) -> Result<(), ServiceError> {
    if let Some(code) = &request.country_code2 {
        if code.len() != 2 {
            return Err(ServiceError::bad_request("country_code2 must be 2 characters"));
        }
    }
    if request.area.is_some_and(|v| v < 0.0) {
        return Err(ServiceError::bad_request("area cannot be negative"));
    }
    if request.radius.is_some_and(|v| v < 0.0) {
        return Err(ServiceError::bad_request("radius cannot be negative"));
    }
    if request.population.is_some_and(|v| v < 0) {
        return Err(ServiceError::bad_request("population cannot be negative"));
    }
    Ok(())
}
