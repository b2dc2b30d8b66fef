use mobilab_database::{Project, ProjectRepository};
use sqlx::SqlitePool;

use super::error::ServiceError;

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Project>, ServiceError> {
    Ok(ProjectRepository::new(pool.clone()).find_all().await?)
}
