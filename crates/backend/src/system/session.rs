//! Durable single-slot session: the last granted session survives a
//! process restart so the client lands back on their dashboard.

use async_trait::async_trait;
use contracts::system::auth::{SessionInfo, UserRole};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

const SESSION_KEY: &str = "active";

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn persist(&self, session: &SessionInfo) -> anyhow::Result<()>;
    async fn read(&self) -> anyhow::Result<Option<SessionInfo>>;
    async fn clear(&self) -> anyhow::Result<()>;
}

/// Session store on the sys_session table (one row per slot)
pub struct SqlSessionStore;

#[async_trait]
impl SessionStore for SqlSessionStore {
    async fn persist(&self, session: &SessionInfo) -> anyhow::Result<()> {
        let conn = get_connection();
        let created_at = chrono::Utc::now().to_rfc3339();
        conn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT OR REPLACE INTO sys_session (key, role, store_index, created_at)
             VALUES (?, ?, ?, ?)",
            [
                SESSION_KEY.into(),
                session.role.code().into(),
                session.store_index.map(|i| i as i64).into(),
                created_at.into(),
            ],
        ))
        .await?;
        Ok(())
    }

    async fn read(&self) -> anyhow::Result<Option<SessionInfo>> {
        let conn = get_connection();
        let row = conn
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "SELECT role, store_index FROM sys_session WHERE key = ?",
                [SESSION_KEY.into()],
            ))
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let role_code: String = row.try_get("", "role")?;
        let Some(role) = UserRole::from_code(&role_code) else {
            // Unreadable row: treat as no session
            tracing::warn!("Discarding session with unknown role '{}'", role_code);
            return Ok(None);
        };
        let store_index: Option<i64> = row.try_get("", "store_index")?;

        Ok(Some(SessionInfo {
            role,
            store_index: store_index.map(|i| i as usize),
        }))
    }

    async fn clear(&self) -> anyhow::Result<()> {
        let conn = get_connection();
        conn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM sys_session WHERE key = ?",
            [SESSION_KEY.into()],
        ))
        .await?;
        Ok(())
    }
}
