use mobilab_database::{TransportMode, TransportModeRepository};
use sqlx::SqlitePool;

use super::error::ServiceError;

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<TransportMode>, ServiceError> {
    Ok(TransportModeRepository::new(pool.clone()).find_all().await?)
}
