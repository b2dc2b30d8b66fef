//! KPI result repository.

use sqlx::SqlitePool;

use crate::entities::{KpiResult, KpiResultInput};
use crate::types::KpiError;

#[derive(Clone)]
pub struct KpiResultRepository {
    pool: SqlitePool,
}

impl KpiResultRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<KpiResult>, KpiError> {
        let results = sqlx::query_as::<_, KpiResult>(
            "SELECT id, kpi_definition_id, living_lab_id, transport_mode_id, value, date
             FROM kpi_results ORDER BY date ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<KpiResult>, KpiError> {
        let result = sqlx::query_as::<_, KpiResult>(
            "SELECT id, kpi_definition_id, living_lab_id, transport_mode_id, value, date
             FROM kpi_results WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_lab(&self, lab_id: i64) -> Result<Vec<KpiResult>, KpiError> {
        let results = sqlx::query_as::<_, KpiResult>(
            "SELECT id, kpi_definition_id, living_lab_id, transport_mode_id, value, date
             FROM kpi_results WHERE living_lab_id = ? ORDER BY date ASC",
        )
        .bind(lab_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    /// Update the row named by `input.id` when it exists, insert a new
    /// one otherwise. Required fields are checked by the service layer.
    pub async fn upsert(&self, input: &KpiResultInput) -> Result<KpiResult, KpiError> {
        let existing = match input.id {
            Some(id) => self.find_by_id(id).await?,
            None => None,
        };

        if let Some(existing) = existing {
            sqlx::query(
                "UPDATE kpi_results
                 SET kpi_definition_id = ?, living_lab_id = ?, transport_mode_id = ?, value = ?, date = ?
                 WHERE id = ?",
            )
            .bind(input.kpi_definition_id)
            .bind(input.living_lab_id)
            .bind(input.transport_mode_id)
            .bind(input.value)
            .bind(&input.date)
            .bind(existing.id)
            .execute(&self.pool)
            .await?;

            return self
                .find_by_id(existing.id)
                .await?
                .ok_or(KpiError::ResultNotFound);
        }

        let result = sqlx::query(
            "INSERT INTO kpi_results (kpi_definition_id, living_lab_id, transport_mode_id, value, date)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(input.kpi_definition_id)
        .bind(input.living_lab_id)
        .bind(input.transport_mode_id)
        .bind(input.value)
        .bind(&input.date)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(KpiError::ResultNotFound)
    }

    /// Returns `false` when no row matched the id.
    pub async fn delete(&self, id: i64) -> Result<bool, KpiError> {
        let result = sqlx::query("DELETE FROM kpi_results WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
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

        sqlx::query("INSERT INTO labs (name, created_at, updated_at) VALUES ('Ghent', '2024-01-01', '2024-01-01')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO kpi_definitions (kpi_number, name, type, progression_target, metric) VALUES ('2', 'Air quality', 'GLOBAL', 0, 'absolute')",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    fn input(value: f64, date: &str) -> KpiResultInput {
        KpiResultInput {
            kpi_definition_id: Some(1),
            living_lab_id: Some(1),
            value: Some(value),
            date: Some(date.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn upsert_without_id_inserts() {
        let repo = KpiResultRepository::new(test_pool().await);

        let created = repo.upsert(&input(12.5, "2023-04-01")).await.unwrap();
        assert_eq!(created.value, 12.5);
        assert!(created.transport_mode_id.is_none());
    }

    #[tokio::test]
    async fn upsert_with_known_id_updates_in_place() {
        let repo = KpiResultRepository::new(test_pool().await);
        let created = repo.upsert(&input(12.5, "2023-04-01")).await.unwrap();

        let mut change = input(14.0, "2023-05-01");
        change.id = Some(created.id);
        let updated = repo.upsert(&change).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.value, 14.0);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn upsert_with_unknown_id_inserts_new_row() {
        let repo = KpiResultRepository::new(test_pool().await);

        let mut payload = input(9.0, "2023-06-01");
        payload.id = Some(404);
        let created = repo.upsert(&payload).await.unwrap();

        assert_ne!(created.id, 404);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_matched() {
        let repo = KpiResultRepository::new(test_pool().await);
        let created = repo.upsert(&input(1.0, "2023-01-01")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
