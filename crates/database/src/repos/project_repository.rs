//! Measure ("project") repository.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::entities::{Project, UpdateProjectRequest};
use crate::types::{LabError, LabResult};

#[derive(Clone)]
pub struct ProjectRepository {
    pool: SqlitePool,
}

impl ProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> LabResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, name, description, type, image_url, created_at, updated_at
             FROM projects ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn find_by_id(&self, id: i64) -> LabResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, name, description, type, image_url, created_at, updated_at
             FROM projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    pub async fn create(&self, request: &UpdateProjectRequest) -> LabResult<Project> {
        let now = Utc::now().to_rfc3339();
        let name = request.name.as_deref().unwrap_or_default();
        let kind = request.kind.unwrap_or(crate::entities::ProjectType::Other);

        let result = sqlx::query(
            "INSERT INTO projects (name, description, type, image_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(&request.description)
        .bind(kind)
        .bind(&request.image_url)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(LabError::ProjectNotFound)
    }

    pub async fn update(&self, id: i64, request: &UpdateProjectRequest) -> LabResult<Project> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE projects
             SET name = COALESCE(?, name),
                 description = COALESCE(?, description),
                 type = COALESCE(?, type),
                 image_url = COALESCE(?, image_url),
                 updated_at = ?
             WHERE id = ?",
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.kind)
        .bind(&request.image_url)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LabError::ProjectNotFound);
        }

        self.find_by_id(id).await?.ok_or(LabError::ProjectNotFound)
    }

    pub async fn delete(&self, id: i64) -> LabResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LabError::ProjectNotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ProjectType;
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
    async fn project_crud_round_trip() {
        let repo = ProjectRepository::new(test_pool().await);

        let created = repo
            .create(&UpdateProjectRequest {
                name: Some("Low emission zone".to_string()),
                kind: Some(ProjectType::Push),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.kind, ProjectType::Push);

        let updated = repo
            .update(
                created.id,
                &UpdateProjectRequest {
                    description: Some("City-centre restriction".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Low emission zone");
        assert_eq!(
            updated.description.as_deref(),
            Some("City-centre restriction")
        );

        repo.delete(created.id).await.unwrap();
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(created.id).await.unwrap_err(),
            LabError::ProjectNotFound
        ));
    }
}
