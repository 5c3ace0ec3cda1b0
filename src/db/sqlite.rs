use crate::db::models::{SettingKey, Settings};
use crate::db::schema::{CONFIG_INIT, SELECT_ALL, UPSERT};
use crate::db::ConfigStore;
use crate::error::NexusError;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct SqliteConfigStore {
    pool: SqlitePool,
}

impl SqliteConfigStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (and create if missing) the database file behind `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, NexusError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn init_schema(&self) -> Result<(), NexusError> {
        sqlx::query(CONFIG_INIT).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for SqliteConfigStore {
    async fn load(&self) -> Result<Settings, NexusError> {
        self.init_schema().await?;
        let rows: Vec<(String, Option<String>)> =
            sqlx::query_as(SELECT_ALL).fetch_all(&self.pool).await?;
        Ok(Settings::from_rows(rows))
    }

    async fn save(&self, values: &[(SettingKey, String)]) -> Result<(), NexusError> {
        self.init_schema().await?;
        let mut tx = self.pool.begin().await?;
        for (key, value) in values {
            sqlx::query(UPSERT)
                .bind(key.as_str())
                .bind(value.as_str())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
