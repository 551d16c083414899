// SQLite implementation of the CredentialStore trait.
// Keeps credentials across restarts; one row per agent.

use crate::core::credentials::{Credential, CredentialError, CredentialStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    /// Open (creating if needed) the credential database at `database_path`.
    pub async fn new(database_path: &str) -> anyhow::Result<Self> {
        let connection_string = format!("sqlite://{}?mode=rwc", database_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&connection_string)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS credentials (
                agent_id TEXT PRIMARY KEY NOT NULL,
                access_token TEXT NOT NULL,
                refresh_token TEXT,
                expiry TEXT,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn get_credential(&self, agent_id: &str) -> Result<Option<Credential>, CredentialError> {
        let row = sqlx::query(
            r#"
            SELECT access_token, refresh_token, expiry
            FROM credentials
            WHERE agent_id = ?
            "#,
        )
        .bind(agent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::Storage(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let expiry = match row.get::<Option<String>, _>("expiry") {
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| {
                        CredentialError::Storage(format!(
                            "Bad expiry '{}' for agent {}: {}",
                            raw, agent_id, e
                        ))
                    })?
                    .with_timezone(&Utc),
            ),
            None => None,
        };

        Ok(Some(Credential {
            access_token: row.get::<String, _>("access_token"),
            refresh_token: row.get::<Option<String>, _>("refresh_token"),
            expiry,
        }))
    }

    async fn set_credential(
        &self,
        agent_id: &str,
        credential: Credential,
    ) -> Result<(), CredentialError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (agent_id, access_token, refresh_token, expiry)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(agent_id) DO UPDATE SET
                access_token = excluded.access_token,
                refresh_token = excluded.refresh_token,
                expiry = excluded.expiry,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(agent_id)
        .bind(credential.access_token)
        .bind(credential.refresh_token)
        .bind(credential.expiry.map(|expiry| expiry.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(|e| CredentialError::Storage(e.to_string()))?;

        Ok(())
    }
}
