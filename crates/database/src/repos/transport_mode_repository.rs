//! Transport mode repository.

use sqlx::SqlitePool;

use crate::entities::{TransportMode, TransportModeType, UpdateTransportModeRequest};
use crate::types::{LabError, LabResult};

#[derive(Clone)]
pub struct TransportModeRepository {
    pool: SqlitePool,
}

impl TransportModeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> LabResult<Vec<TransportMode>> {
        let modes = sqlx::query_as::<_, TransportMode>(
            "SELECT id, name, description, type, color FROM transport_modes ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(modes)
    }

    pub async fn find_by_id(&self, id: i64) -> LabResult<Option<TransportMode>> {
        let mode = sqlx::query_as::<_, TransportMode>(
            "SELECT id, name, description, type, color FROM transport_modes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mode)
    }

    pub async fn create(&self, request: &UpdateTransportModeRequest) -> LabResult<TransportMode> {
        let name = request.name.as_deref().unwrap_or_default();
        let kind = request.kind.unwrap_or(TransportModeType::Private);

        let result = sqlx::query(
            "INSERT INTO transport_modes (name, description, type, color) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(&request.description)
        .bind(kind)
        .bind(&request.color)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(LabError::TransportModeNotFound)
    }

    pub async fn update(
        &self,
        id: i64,
        request: &UpdateTransportModeRequest,
    ) -> LabResult<TransportMode> {
        let result = sqlx::query(
            "UPDATE transport_modes
             SET name = COALESCE(?, name),
                 description = COALESCE(?, description),
                 type = COALESCE(?, type),
                 color = COALESCE(?, color)
             WHERE id = ?",
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.kind)
        .bind(&request.color)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LabError::TransportModeNotFound);
        }

        self.find_by_id(id)
            .await?
            .ok_or(LabError::TransportModeNotFound)
    }

    pub async fn delete(&self, id: i64) -> LabResult<()> {
        let result = sqlx::query("DELETE FROM transport_modes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LabError::TransportModeNotFound);
        }

        Ok(())
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

    #[tokio::test]
    async fn transport_mode_crud_round_trip() {
        let repo = TransportModeRepository::new(test_pool().await);

        let created = repo
            .create(&UpdateTransportModeRequest {
                name: Some("E-scooter sharing".to_string()),
                kind: Some(TransportModeType::Nsm),
                color: Some("#ffaa00".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.kind, TransportModeType::Nsm);

        let updated = repo
            .update(
                created.id,
                &UpdateTransportModeRequest {
                    color: Some("#ff0000".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.color.as_deref(), Some("#ff0000"));
        assert_eq!(updated.name, "E-scooter sharing");

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);

        repo.delete(created.id).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
