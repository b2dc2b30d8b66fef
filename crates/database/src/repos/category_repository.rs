//! Category repository.

use sqlx::SqlitePool;

use crate::entities::{Category, KpiDefinition, PopulatedCategory};
use crate::types::KpiError;

#[derive(Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Categories with their member KPI definitions, optionally filtered
    /// by category type.
    pub async fn find_all(&self, kind: Option<&str>) -> Result<Vec<PopulatedCategory>, KpiError> {
        let categories = match kind {
            Some(kind) => {
                sqlx::query_as::<_, Category>(
                    "SELECT id, name, type FROM categories WHERE type = ? ORDER BY id ASC",
                )
                .bind(kind)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Category>(
                    "SELECT id, name, type FROM categories ORDER BY id ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut populated = Vec::with_capacity(categories.len());
        for category in categories {
            let kpis = sqlx::query_as::<_, KpiDefinition>(
                "SELECT d.id, d.kpi_number, d.parent_kpi_id, d.name, d.description, d.disclaimer, d.type, d.progression_target, d.metric, d.metric_description, d.min_value, d.max_value
                 FROM kpi_definitions d
                 INNER JOIN kpi_definition_categories dc ON dc.kpi_definition_id = d.id
                 WHERE dc.category_id = ?
                 ORDER BY d.kpi_number ASC",
            )
            .bind(category.id)
            .fetch_all(&self.pool)
            .await?;

            populated.push(PopulatedCategory { category, kpis });
        }

        Ok(populated)
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

        sqlx::query("INSERT INTO categories (name, type) VALUES ('Environment', 'impact'), ('Mobility', 'usage')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO kpi_definitions (kpi_number, name, type, progression_target, metric) VALUES ('2', 'Air quality', 'GLOBAL', 0, 'absolute')",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO kpi_definition_categories (kpi_definition_id, category_id) VALUES (1, 1)")
            .execute(&pool)
            .await
            .unwrap();

        pool
    }

    #[tokio::test]
    async fn categories_come_back_with_their_kpis() {
        let repo = CategoryRepository::new(test_pool().await);

        let categories = repo.find_all(None).await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].category.name, "Environment");
        assert_eq!(categories[0].kpis.len(), 1);
        assert_eq!(categories[0].kpis[0].kpi_number, "2");
        assert!(categories[1].kpis.is_empty());
    }

    #[tokio::test]
    async fn type_filter_narrows_the_listing() {
        let repo = CategoryRepository::new(test_pool().await);

        let categories = repo.find_all(Some("usage")).await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].category.name, "Mobility");
    }
}
