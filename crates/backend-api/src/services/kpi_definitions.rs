use mobilab_database::{KpiDefinition, KpiDefinitionRepository};
use sqlx::SqlitePool;

use super::error::ServiceError;

/// All definitions, or a parent definition with its children when a
/// `kpi_number` filter is given.
pub async fn get_all(
    pool: &SqlitePool,
    kpi_number: Option<&str>,
) -> Result<Vec<KpiDefinition>, ServiceError> {
    let repo = KpiDefinitionRepository::new(pool.clone());

    match kpi_number {
        Some(number) => Ok(repo
            .find_by_number_with_children(number)
            .await?
            .unwrap_or_default()),
        None => Ok(repo.find_all().await?),
    }
}
