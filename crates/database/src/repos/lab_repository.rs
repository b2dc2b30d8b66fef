//! Living-lab repository: lab CRUD, relation upkeep, and the populated
//! view the dashboard renders.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::aggregate::pair_results;
use crate::entities::{
    Lab, LabProjectImplementation, LabTransportModeImplementation, PopulatedLab, Project,
    TransportMode, TransportModeStatus, UpdateLabRequest,
};
use crate::entities::kpi::KpiResult;
use crate::types::{LabError, LabResult};

#[derive(Clone)]
pub struct LabRepository {
    pool: SqlitePool,
}

impl LabRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> LabResult<Vec<Lab>> {
        let labs = sqlx::query_as::<_, Lab>(
            "SELECT id, name, country, flag, description, area, radius, population, country_code2, lat, lng, created_at, updated_at
             FROM labs ORDER BY name DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(labs)
    }

    pub async fn find_by_id(&self, id: i64) -> LabResult<Option<Lab>> {
        let lab = sqlx::query_as::<_, Lab>(
            "SELECT id, name, country, flag, description, area, radius, population, country_code2, lat, lng, created_at, updated_at
             FROM labs WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lab)
    }

    pub async fn create(&self, request: &UpdateLabRequest) -> LabResult<Lab> {
        let now = Utc::now().to_rfc3339();
        // Name presence is enforced by the service layer.
        let name = request.name.as_deref().unwrap_or_default();

        let result = sqlx::query(
            "INSERT INTO labs (name, country, flag, description, area, radius, population, country_code2, lat, lng, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(&request.country)
        .bind(&request.flag)
        .bind(&request.description)
        .bind(request.area)
        .bind(request.radius)
        .bind(request.population)
        .bind(&request.country_code2)
        .bind(&request.lat)
        .bind(&request.lng)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(LabError::LabNotFound)
    }

    pub async fn update(&self, id: i64, request: &UpdateLabRequest) -> LabResult<Lab> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE labs
             SET name = COALESCE(?, name),
                 country = COALESCE(?, country),
                 flag = COALESCE(?, flag),
                 description = COALESCE(?, description),
                 area = COALESCE(?, area),
                 radius = COALESCE(?, radius),
                 population = COALESCE(?, population),
                 country_code2 = COALESCE(?, country_code2),
                 lat = COALESCE(?, lat),
                 lng = COALESCE(?, lng),
                 updated_at = ?
             WHERE id = ?",
        )
        .bind(&request.name)
        .bind(&request.country)
        .bind(&request.flag)
        .bind(&request.description)
        .bind(request.area)
        .bind(request.radius)
        .bind(request.population)
        .bind(&request.country_code2)
        .bind(&request.lat)
        .bind(&request.lng)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LabError::LabNotFound);
        }

        self.find_by_id(id).await?.ok_or(LabError::LabNotFound)
    }

    /// Lab with its relations resolved and KPI results folded into
    /// before/after pairs.
    pub async fn find_populated(&self, id: i64) -> LabResult<Option<PopulatedLab>> {
        let Some(lab) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        Ok(Some(self.populate(lab).await?))
    }

    pub async fn find_all_populated(&self) -> LabResult<Vec<PopulatedLab>> {
        let labs = self.find_all().await?;

        let mut populated = Vec::with_capacity(labs.len());
        for lab in labs {
            populated.push(self.populate(lab).await?);
        }

        Ok(populated)
    }

    async fn populate(&self, lab: Lab) -> LabResult<PopulatedLab> {
        let projects = self.projects_for_lab(lab.id).await?;
        let transport_modes = self.transport_modes_for_lab(lab.id).await?;
        let results = self.results_for_lab(lab.id).await?;

        Ok(PopulatedLab {
            lab,
            projects,
            transport_modes,
            kpi_results: pair_results(&results),
        })
    }

    pub async fn projects_for_lab(&self, lab_id: i64) -> LabResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT p.id, p.name, p.description, p.type, p.image_url, p.created_at, p.updated_at
             FROM projects p
             INNER JOIN living_lab_projects llp ON llp.project_id = p.id
             WHERE llp.living_lab_id = ?
             ORDER BY p.name ASC",
        )
        .bind(lab_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn transport_modes_for_lab(&self, lab_id: i64) -> LabResult<Vec<TransportMode>> {
        let modes = sqlx::query_as::<_, TransportMode>(
            "SELECT tm.id, tm.name, tm.description, tm.type, tm.color
             FROM transport_modes tm
             INNER JOIN living_lab_transport_modes lltm ON lltm.transport_mode_id = tm.id
             WHERE lltm.living_lab_id = ?
             ORDER BY tm.name ASC",
        )
        .bind(lab_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(modes)
    }

    pub async fn results_for_lab(&self, lab_id: i64) -> LabResult<Vec<KpiResult>> {
        let results = sqlx::query_as::<_, KpiResult>(
            "SELECT id, kpi_definition_id, living_lab_id, transport_mode_id, value, date
             FROM kpi_results WHERE living_lab_id = ?",
        )
        .bind(lab_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    pub async fn upsert_project_implementation(
        &self,
        lab_id: i64,
        project_id: i64,
        start_at: Option<&str>,
    ) -> LabResult<LabProjectImplementation> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO living_lab_projects (living_lab_id, project_id, start_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT (living_lab_id, project_id)
             DO UPDATE SET start_at = COALESCE(excluded.start_at, start_at), updated_at = excluded.updated_at",
        )
        .bind(lab_id)
        .bind(project_id)
        .bind(start_at)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, LabProjectImplementation>(
            "SELECT id, living_lab_id, project_id, start_at, created_at, updated_at
             FROM living_lab_projects WHERE living_lab_id = ? AND project_id = ?",
        )
        .bind(lab_id)
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(LabError::ImplementationNotFound)
    }

    pub async fn delete_project_implementation(
        &self,
        lab_id: i64,
        project_id: i64,
    ) -> LabResult<()> {
        let result = sqlx::query(
            "DELETE FROM living_lab_projects WHERE living_lab_id = ? AND project_id = ?",
        )
        .bind(lab_id)
        .bind(project_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LabError::ImplementationNotFound);
        }

        Ok(())
    }

    pub async fn upsert_transport_mode_implementation(
        &self,
        lab_id: i64,
        transport_mode_id: i64,
        status: TransportModeStatus,
    ) -> LabResult<LabTransportModeImplementation> {
        sqlx::query(
            "INSERT INTO living_lab_transport_modes (living_lab_id, transport_mode_id, status)
             VALUES (?, ?, ?)
             ON CONFLICT (living_lab_id, transport_mode_id)
             DO UPDATE SET status = excluded.status",
        )
        .bind(lab_id)
        .bind(transport_mode_id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, LabTransportModeImplementation>(
            "SELECT id, living_lab_id, transport_mode_id, status
             FROM living_lab_transport_modes WHERE living_lab_id = ? AND transport_mode_id = ?",
        )
        .bind(lab_id)
        .bind(transport_mode_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(LabError::ImplementationNotFound)
    }

    pub async fn delete_transport_mode_implementation(
        &self,
        lab_id: i64,
        transport_mode_id: i64,
    ) -> LabResult<()> {
        let result = sqlx::query(
            "DELETE FROM living_lab_transport_modes WHERE living_lab_id = ? AND transport_mode_id = ?",
        )
        .bind(lab_id)
        .bind(transport_mode_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LabError::ImplementationNotFound);
        }

        Ok(())
    }
}
