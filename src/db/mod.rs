//! Persistent settings storage.
//!
//! Layout:
//! - `models.rs`: setting keys and the loaded `Settings` snapshot
//! - `schema.rs`: SQL for the single `config` key/value table
//! - `sqlite.rs`: local SQLite store (sqlx)
//! - `remote.rs`: libsql/sqld store reached over HTTP
//! - `connection.rs`: picks one of the two from the environment

pub mod connection;
pub mod models;
pub mod remote;
pub mod schema;
pub mod sqlite;

use crate::error::NexusError;
use async_trait::async_trait;
use std::sync::Arc;

pub use connection::{ConnectionSpec, open};
pub use models::{SettingKey, Settings};
pub use remote::LibsqlConfigStore;
pub use sqlite::{SqliteConfigStore, SqlitePool};

/// Key/value settings store shared by every request.
///
/// Both operations create the backing table when it does not exist yet.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load(&self) -> Result<Settings, NexusError>;

    /// Insert-or-replace every pair in a single transaction.
    async fn save(&self, values: &[(SettingKey, String)]) -> Result<(), NexusError>;
}

pub type SharedConfigStore = Arc<dyn ConfigStore>;
