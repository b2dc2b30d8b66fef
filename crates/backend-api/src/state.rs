use mobilab_config::AdminApiConfig;
use sqlx::SqlitePool;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
    admin: AdminApiConfig,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(pool: SqlitePool, admin: AdminApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(admin.request_timeout_seconds))
            .build()
            .unwrap_or_default();

        Self { pool, admin, http }
    }

    pub fn db_pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn admin(&self) -> &AdminApiConfig {
        &self.admin
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
