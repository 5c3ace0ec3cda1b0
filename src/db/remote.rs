use crate::db::models::{SettingKey, Settings};
use crate::db::schema::{CONFIG_INIT, SELECT_ALL, UPSERT};
use crate::db::ConfigStore;
use crate::error::NexusError;
use async_trait::async_trait;
use libsql::{Builder, Connection, Database};

/// Settings store on a libsql server (hosted database or a local sqld).
pub struct LibsqlConfigStore {
    db: Database,
}

impl LibsqlConfigStore {
    pub async fn connect(url: &str, auth_token: Option<&str>) -> Result<Self, NexusError> {
        let db = Builder::new_remote(url.to_string(), auth_token.unwrap_or_default().to_string())
            .build()
            .await?;
        Ok(Self { db })
    }
}

#[async_trait]
impl ConfigStore for LibsqlConfigStore {
    async fn load(&self) -> Result<Settings, NexusError> {
        let conn = self.db.connect()?;
        load_settings(&conn).await
    }

    async fn save(&self, values: &[(SettingKey, String)]) -> Result<(), NexusError> {
        let conn = self.db.connect()?;
        save_settings(&conn, values).await
    }
}

/// What the store needs from a connection.
#[async_trait]
trait Session: Sync {
    async fn run(&self, sql: &str) -> Result<(), NexusError>;

    async fn pairs(&self, sql: &str) -> Result<Vec<(String, Option<String>)>, NexusError>;

    /// Runs `sql` once per row, all inside one transaction.
    async fn run_batch(&self, sql: &str, rows: &[(&str, &str)]) -> Result<(), NexusError>;
}

#[async_trait]
impl Session for Connection {
    async fn run(&self, sql: &str) -> Result<(), NexusError> {
        self.execute(sql, ()).await?;
        Ok(())
    }

    async fn pairs(&self, sql: &str) -> Result<Vec<(String, Option<String>)>, NexusError> {
        let mut rows = self.query(sql, ()).await?;
        let mut pairs = Vec::new();
        while let Some(row) = rows.next().await? {
            let key: String = row.get(0)?;
            let value: Option<String> = row.get(1)?;
            pairs.push((key, value));
        }
        Ok(pairs)
    }

    async fn run_batch(&self, sql: &str, rows: &[(&str, &str)]) -> Result<(), NexusError> {
        let tx = self.transaction().await?;
        for (key, value) in rows {
            tx.execute(sql, libsql::params![*key, *value]).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

async fn load_settings<S: Session>(session: &S) -> Result<Settings, NexusError> {
    session.run(CONFIG_INIT).await?;
    Ok(Settings::from_rows(session.pairs(SELECT_ALL).await?))
}

async fn save_settings<S: Session>(
    session: &S,
    values: &[(SettingKey, String)],
) -> Result<(), NexusError> {
    session.run(CONFIG_INIT).await?;
    let rows: Vec<(&str, &str)> = values
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    session.run_batch(UPSERT, &rows).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-memory stand-in for a sqld connection. Statements against a missing
    /// table fail, and a batch is applied only when every row succeeds.
    #[derive(Default)]
    struct MemorySession {
        table: Mutex<Option<BTreeMap<String, Option<String>>>>,
        log: Mutex<Vec<String>>,
        reject_key: Option<&'static str>,
    }

    impl MemorySession {
        fn with_rows(rows: &[(&str, &str)]) -> Self {
            let table = rows
                .iter()
                .map(|(k, v)| (k.to_string(), Some(v.to_string())))
                .collect();
            Self {
                table: Mutex::new(Some(table)),
                ..Self::default()
            }
        }

        fn log(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }

        fn rows(&self) -> usize {
            self.table.lock().unwrap().as_ref().map_or(0, BTreeMap::len)
        }
    }

    #[async_trait]
    impl Session for MemorySession {
        async fn run(&self, sql: &str) -> Result<(), NexusError> {
            self.log.lock().unwrap().push(sql.to_string());
            assert_eq!(sql, CONFIG_INIT);
            self.table.lock().unwrap().get_or_insert_with(BTreeMap::new);
            Ok(())
        }

        async fn pairs(&self, sql: &str) -> Result<Vec<(String, Option<String>)>, NexusError> {
            self.log.lock().unwrap().push(sql.to_string());
            let table = self.table.lock().unwrap();
            let table = table
                .as_ref()
                .ok_or_else(|| NexusError::app("no such table: config"))?;
            Ok(table.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        }

        async fn run_batch(&self, sql: &str, rows: &[(&str, &str)]) -> Result<(), NexusError> {
            self.log.lock().unwrap().push(format!("BEGIN; {sql} x{}", rows.len()));
            let mut table = self.table.lock().unwrap();
            let current = table
                .as_ref()
                .ok_or_else(|| NexusError::app("no such table: config"))?;
            let mut staged = current.clone();
            for (key, value) in rows {
                if self.reject_key == Some(*key) {
                    return Err(NexusError::app("write rejected"));
                }
                staged.insert(key.to_string(), Some(value.to_string()));
            }
            *table = Some(staged);
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_creates_the_table_on_first_use() {
        let session = MemorySession::default();
        assert_eq!(load_settings(&session).await.unwrap(), Settings::default());
        assert_eq!(session.log(), vec![CONFIG_INIT.to_string(), SELECT_ALL.to_string()]);
    }

    #[tokio::test]
    async fn save_creates_the_table_before_writing() {
        let session = MemorySession::default();
        save_settings(&session, &[(SettingKey::GithubToken, "tok".to_string())])
            .await
            .unwrap();
        let log = session.log();
        assert_eq!(log[0], CONFIG_INIT);
        assert_eq!(log[1], format!("BEGIN; {UPSERT} x1"));
    }

    #[tokio::test]
    async fn save_replaces_existing_values() {
        let session = MemorySession::default();
        save_settings(
            &session,
            &[
                (SettingKey::GithubRepository, "acme/old".to_string()),
                (SettingKey::GithubToken, "t1".to_string()),
            ],
        )
        .await
        .unwrap();
        save_settings(&session, &[(SettingKey::GithubRepository, "acme/site".to_string())])
            .await
            .unwrap();

        let settings = load_settings(&session).await.unwrap();
        assert_eq!(settings.credentials(), Some(("acme/site", "t1")));
        assert_eq!(session.rows(), 2);
    }

    #[tokio::test]
    async fn failed_save_writes_nothing() {
        let session = MemorySession {
            reject_key: Some("githubToken"),
            ..MemorySession::with_rows(&[("githubRepository", "acme/old")])
        };
        let err = save_settings(
            &session,
            &[
                (SettingKey::GithubRepository, "acme/site".to_string()),
                (SettingKey::GithubToken, "tok".to_string()),
            ],
        )
        .await
        .unwrap_err();
        assert_eq!(err.user_message(), "write rejected");

        let settings = load_settings(&session).await.unwrap();
        assert_eq!(settings.github_repository.as_deref(), Some("acme/old"));
        assert_eq!(settings.github_token, None);
    }

    #[tokio::test]
    async fn unknown_keys_are_ignored() {
        let session = MemorySession::with_rows(&[
            ("githubRepository", "acme/site"),
            ("theme", "dark"),
            ("githubToken", "tok"),
        ]);
        let settings = load_settings(&session).await.unwrap();
        assert_eq!(settings.credentials(), Some(("acme/site", "tok")));
    }
}
