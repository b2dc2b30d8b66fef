//! KPI definition repository.

use sqlx::SqlitePool;

use crate::entities::KpiDefinition;
use crate::types::KpiError;

const DEFINITION_COLUMNS: &str = "id, kpi_number, parent_kpi_id, name, description, disclaimer, type, progression_target, metric, metric_description, min_value, max_value";

#[derive(Clone)]
pub struct KpiDefinitionRepository {
    pool: SqlitePool,
}

impl KpiDefinitionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<KpiDefinition>, KpiError> {
        let definitions = sqlx::query_as::<_, KpiDefinition>(&format!(
            "SELECT {DEFINITION_COLUMNS} FROM kpi_definitions ORDER BY kpi_number DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(definitions)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<KpiDefinition>, KpiError> {
        let definition = sqlx::query_as::<_, KpiDefinition>(&format!(
            "SELECT {DEFINITION_COLUMNS} FROM kpi_definitions WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(definition)
    }

    /// Resolve a KPI number to its definition followed by its direct
    /// children, or `None` when the number is unknown.
    pub async fn find_by_number_with_children(
        &self,
        kpi_number: &str,
    ) -> Result<Option<Vec<KpiDefinition>>, KpiError> {
        let parent = sqlx::query_as::<_, KpiDefinition>(&format!(
            "SELECT {DEFINITION_COLUMNS} FROM kpi_definitions WHERE kpi_number = ? LIMIT 1"
        ))
        .bind(kpi_number)
        .fetch_optional(&self.pool)
        .await?;

        let Some(parent) = parent else {
            return Ok(None);
        };

        let children = sqlx::query_as::<_, KpiDefinition>(&format!(
            "SELECT {DEFINITION_COLUMNS} FROM kpi_definitions WHERE parent_kpi_id = ? ORDER BY kpi_number ASC"
        ))
        .bind(parent.id)
        .fetch_all(&self.pool)
        .await?;

        let mut definitions = vec![parent];
        definitions.extend(children);
        Ok(Some(definitions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::migrations::MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    async fn insert_definition(pool: &SqlitePool, number: &str, parent: Option<i64>) -> i64 {
        sqlx::query(
            "INSERT INTO kpi_definitions (kpi_number, parent_kpi_id, name, type, progression_target, metric)
             VALUES (?, ?, ?, 'GLOBAL', 0, 'percentage')",
        )
        .bind(number)
        .bind(parent)
        .bind(format!("KPI {number}"))
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    #[tokio::test]
    async fn find_all_orders_by_number_descending() {
        let pool = test_pool().await;
        let repo = KpiDefinitionRepository::new(pool.clone());

        insert_definition(&pool, "1", None).await;
        insert_definition(&pool, "15", None).await;

        let definitions = repo.find_all().await.unwrap();
        assert_eq!(definitions[0].kpi_number, "15");
        assert_eq!(definitions[1].kpi_number, "1");
    }

    #[tokio::test]
    async fn number_lookup_returns_parent_then_children() {
        let pool = test_pool().await;
        let repo = KpiDefinitionRepository::new(pool.clone());

        let parent_id = insert_definition(&pool, "15", None).await;
        insert_definition(&pool, "15.a", Some(parent_id)).await;
        insert_definition(&pool, "15.b", Some(parent_id)).await;
        insert_definition(&pool, "3", None).await;

        let family = repo
            .find_by_number_with_children("15")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(family.len(), 3);
        assert_eq!(family[0].kpi_number, "15");
        assert_eq!(family[1].kpi_number, "15.a");
        assert_eq!(family[2].kpi_number, "15.b");
    }

    #[tokio::test]
    async fn unknown_number_resolves_to_none() {
        let repo = KpiDefinitionRepository::new(test_pool().await);
        assert!(repo
            .find_by_number_with_children("99")
            .await
            .unwrap()
            .is_none());
    }
}
