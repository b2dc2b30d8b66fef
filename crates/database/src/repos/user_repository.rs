//! User repository. Rows are always returned as the safe [`User`] view
//! (no password), with role and lab relations populated.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::entities::{
    CreateUserRequest, LabSummary, Role, UpdateUserRequest, User, UserStatus,
};
use crate::types::{UserError, UserResult};

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    name: String,
    phone: Option<String>,
    picture: Option<String>,
    role_id: i64,
    status: UserStatus,
    created_at: String,
}

const USER_COLUMNS: &str = "id, email, name, phone, picture, role_id, status, created_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> UserResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        self.populate_all(rows).await
    }

    pub async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.populate(row).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.populate(row).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_status(&self, status: UserStatus) -> UserResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE status = ? ORDER BY created_at DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        self.populate_all(rows).await
    }

    pub async fn find_by_role(&self, role_id: i64) -> UserResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role_id = ? ORDER BY created_at DESC"
        ))
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?;

        self.populate_all(rows).await
    }

    /// Users holding `role_id` for a given lab in a given status. Used to
    /// decide whether a freshly signed-up editor can be auto-activated.
    pub async fn find_by_role_lab_status(
        &self,
        role_id: i64,
        lab_id: i64,
        status: UserStatus,
    ) -> UserResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT u.{} FROM users u
             INNER JOIN living_lab_users llu ON llu.user_id = u.id
             WHERE u.role_id = ? AND llu.living_lab_id = ? AND u.status = ?",
            USER_COLUMNS.replace(", ", ", u.")
        ))
        .bind(role_id)
        .bind(lab_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        self.populate_all(rows).await
    }

    pub async fn create(&self, request: &CreateUserRequest) -> UserResult<User> {
        let now = Utc::now().to_rfc3339();
        let status = request.status.unwrap_or(UserStatus::Signup);

        let result = sqlx::query(
            "INSERT INTO users (email, name, password, phone, picture, role_id, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&request.email)
        .bind(&request.name)
        .bind(&request.password)
        .bind(&request.phone)
        .bind(&request.picture)
        .bind(request.role_id)
        .bind(status)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(UserError::UserNotFound)
    }

    pub async fn update(&self, id: i64, request: &UpdateUserRequest) -> UserResult<User> {
        let result = sqlx::query(
            "UPDATE users
             SET email = COALESCE(?, email),
                 name = COALESCE(?, name),
                 password = COALESCE(?, password),
                 phone = COALESCE(?, phone),
                 picture = COALESCE(?, picture),
                 role_id = COALESCE(?, role_id),
                 status = COALESCE(?, status)
             WHERE id = ?",
        )
        .bind(&request.email)
        .bind(&request.name)
        .bind(&request.password)
        .bind(&request.phone)
        .bind(&request.picture)
        .bind(request.role_id)
        .bind(request.status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(UserError::UserNotFound);
        }

        if let Some(lab_id) = request.living_lab_id {
            self.set_living_lab(id, lab_id).await?;
        }

        self.find_by_id(id).await?.ok_or(UserError::UserNotFound)
    }

    /// Attach a lab to a user. Idempotent.
    pub async fn set_living_lab(&self, user_id: i64, lab_id: i64) -> UserResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO living_lab_users (user_id, living_lab_id) VALUES (?, ?)",
        )
        .bind(user_id)
        .bind(lab_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn populate_all(&self, rows: Vec<UserRow>) -> UserResult<Vec<User>> {
        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            users.push(self.populate(row).await?);
        }
        Ok(users)
    }

    async fn populate(&self, row: UserRow) -> UserResult<User> {
        let role = sqlx::query_as::<_, Role>(
            "SELECT id, name, description FROM roles WHERE id = ?",
        )
        .bind(row.role_id)
        .fetch_optional(&self.pool)
        .await?;

        let labs = sqlx::query_as::<_, LabSummary>(
            "SELECT l.id, l.name FROM labs l
             INNER JOIN living_lab_users llu ON llu.living_lab_id = l.id
             WHERE llu.user_id = ?
             ORDER BY l.name ASC",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(User {
            id: row.id,
            email: row.email,
            name: row.name,
            phone: row.phone,
            picture: row.picture,
            role_id: row.role_id,
            status: row.status,
            created_at: row.created_at,
            role,
            labs,
        })
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

    fn editor(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            name: "Test Editor".to_string(),
            password: "secret-password".to_string(),
            password_confirmation: None,
            phone: None,
            picture: None,
            role_id: 2,
            status: None,
        }
    }

    #[tokio::test]
    async fn create_populates_role_and_defaults_to_signup() {
        let repo = UserRepository::new(test_pool().await);

        let user = repo.create(&editor("editor@example.com")).await.unwrap();
        assert_eq!(user.status, UserStatus::Signup);
        assert_eq!(user.role.as_ref().unwrap().name, "lab_editor");
        assert!(user.labs.is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = UserRepository::new(test_pool().await);
        repo.create(&editor("dup@example.com")).await.unwrap();

        let err = repo.create(&editor("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, UserError::EmailAlreadyExists));
        assert!(repo.email_exists("dup@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn lab_relation_shows_up_on_the_user() {
        let pool = test_pool().await;
        let repo = UserRepository::new(pool.clone());

        sqlx::query("INSERT INTO labs (name, created_at, updated_at) VALUES ('Ghent', '2024-01-01', '2024-01-01')")
            .execute(&pool)
            .await
            .unwrap();

        let user = repo.create(&editor("editor@example.com")).await.unwrap();
        repo.set_living_lab(user.id, 1).await.unwrap();
        // attaching twice is fine
        repo.set_living_lab(user.id, 1).await.unwrap();

        let user = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(user.labs.len(), 1);
        assert_eq!(user.labs[0].name, "Ghent");
    }

    #[tokio::test]
    async fn status_filter_and_role_lab_lookup() {
        let pool = test_pool().await;
        let repo = UserRepository::new(pool.clone());

        sqlx::query("INSERT INTO labs (name, created_at, updated_at) VALUES ('Ghent', '2024-01-01', '2024-01-01')")
            .execute(&pool)
            .await
            .unwrap();

        let active = repo.create(&editor("active@example.com")).await.unwrap();
        repo.update(
            active.id,
            &UpdateUserRequest {
                status: Some(UserStatus::Active),
                living_lab_id: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        repo.create(&editor("pending@example.com")).await.unwrap();

        let actives = repo.find_by_status(UserStatus::Active).await.unwrap();
        assert_eq!(actives.len(), 1);
        assert_eq!(actives[0].email, "active@example.com");

        let editors = repo
            .find_by_role_lab_status(2, 1, UserStatus::Active)
            .await
            .unwrap();
        assert_eq!(editors.len(), 1);

        let none = repo
            .find_by_role_lab_status(2, 1, UserStatus::Disabled)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn update_patches_fields_without_clearing_others() {
        let repo = UserRepository::new(test_pool().await);
        let user = repo.create(&editor("editor@example.com")).await.unwrap();

        let updated = repo
            .update(
                user.id,
                &UpdateUserRequest {
                    name: Some("Renamed Editor".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed Editor");
        assert_eq!(updated.email, "editor@example.com");
    }
}
