use crate::db::{LibsqlConfigStore, SharedConfigStore, SqliteConfigStore};
use crate::error::NexusError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Where the settings table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionSpec {
    /// Local SQLite file or in-memory database, handled by sqlx.
    Sqlite { url: String },
    /// libsql server over HTTP(S); hosted databases carry an auth token.
    Libsql {
        url: String,
        auth_token: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct PlatformDescriptor {
    services: PlatformServices,
}

#[derive(Debug, Deserialize)]
struct PlatformServices {
    maindb: MainDb,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MainDb {
    database_hostname: String,
    database_api_token: String,
}

impl ConnectionSpec {
    /// Resolve the store location.
    ///
    /// A platform descriptor, when given, names the hosted database. Without
    /// one, `fallback_url` is used: `http(s)://` and `libsql://` URLs point at
    /// a libsql server, anything else is treated as a SQLite URL.
    pub fn resolve(descriptor: Option<&str>, fallback_url: &str) -> Result<Self, NexusError> {
        if let Some(raw) = descriptor {
            let parsed: PlatformDescriptor = serde_json::from_str(raw)
                .map_err(|e| NexusError::InvalidDescriptor(e.to_string()))?;
            let maindb = parsed.services.maindb;
            return Ok(ConnectionSpec::Libsql {
                url: format!("libsql://{}", maindb.database_hostname),
                auth_token: Some(maindb.database_api_token),
            });
        }

        let is_libsql = ["http://", "https://", "libsql://"]
            .iter()
            .any(|scheme| fallback_url.starts_with(scheme));
        if is_libsql {
            Ok(ConnectionSpec::Libsql {
                url: fallback_url.to_string(),
                auth_token: None,
            })
        } else {
            Ok(ConnectionSpec::Sqlite {
                url: fallback_url.to_string(),
            })
        }
    }
}

/// Open the store described by `spec`.
pub async fn open(spec: &ConnectionSpec) -> Result<SharedConfigStore, NexusError> {
    match spec {
        ConnectionSpec::Sqlite { url } => {
            info!(database_url = %url, "using sqlite settings store");
            Ok(Arc::new(SqliteConfigStore::connect(url).await?))
        }
        ConnectionSpec::Libsql { url, auth_token } => {
            info!(database_url = %url, authenticated = auth_token.is_some(), "using libsql settings store");
            Ok(Arc::new(
                LibsqlConfigStore::connect(url, auth_token.as_deref()).await?,
            ))
        }
    }
}
