use mobilab_database::{CategoryRepository, PopulatedCategory};
use sqlx::SqlitePool;

use super::error::ServiceError;

pub async fn get(
    pool: &SqlitePool,
    kind: Option<&str>,
) -> Result<Vec<PopulatedCategory>, ServiceError> {
    Ok(CategoryRepository::new(pool.clone()).find_all(kind).await?)
}
