//! Access gate: one code field, two explicit branches.
//!
//! ADMIN compares the code against the configured administrative secret;
//! CLIENT matches it against store codes in the directory. The branch is
//! always the caller's explicit choice, never inferred from the code.

use contracts::system::auth::{AccessGranted, AccessMode, AccessRequest, SessionInfo, UserRole};
use thiserror::Error;

use crate::domain::a001_store::directory::StoreDirectory;
use crate::domain::a001_store::repository::StoreRepository;
use crate::system::session::SessionStore;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Senha administrativa incorreta. Acesso negado.")]
    InvalidAdminSecret,
    #[error("Identificador da loja inválido. Verifique o código e tente novamente.")]
    UnknownStoreCode,
    #[error("Falha ao gravar a sessão")]
    Session(#[source] anyhow::Error),
}

impl AccessError {
    /// A refusal is the gate working as intended; a session failure is not
    pub fn is_refusal(&self) -> bool {
        !matches!(self, AccessError::Session(_))
    }
}

/// Authorize one access request against the current directory.
///
/// The granted session is persisted before it is returned; a session that
/// cannot be persisted is not granted.
pub async fn authorize<R, S>(
    request: &AccessRequest,
    directory: &StoreDirectory<R>,
    sessions: &S,
    admin_secret: &str,
) -> Result<AccessGranted, AccessError>
where
    R: StoreRepository,
    S: SessionStore,
{
    let code = request.code.trim();

    let granted = match request.mode {
        AccessMode::Admin => {
            if code != admin_secret {
                return Err(AccessError::InvalidAdminSecret);
            }
            // Default selection: first store, or none over an empty directory
            let store_index = if directory.is_empty() { None } else { Some(0) };
            AccessGranted {
                session: SessionInfo {
                    role: UserRole::Admin,
                    store_index,
                },
                store_name: None,
            }
        }
        AccessMode::Client => {
            let (index, store) = directory
                .find_by_code(code)
                .ok_or(AccessError::UnknownStoreCode)?;
            AccessGranted {
                session: SessionInfo {
                    role: UserRole::Client,
                    store_index: Some(index),
                },
                store_name: Some(store.base.description.clone()),
            }
        }
    };

    sessions
        .persist(&granted.session)
        .await
        .map_err(AccessError::Session)?;

    tracing::info!(
        "Access granted: {} (store_index: {:?})",
        granted.session.role.code(),
        granted.session.store_index
    );
    Ok(granted)
}

/// Resume the persisted session, if any.
///
/// A session pointing at a store index that no longer exists is stale:
/// it is cleared and treated as no session.
pub async fn resume<R, S>(
    directory: &StoreDirectory<R>,
    sessions: &S,
) -> anyhow::Result<Option<AccessGranted>>
where
    R: StoreRepository,
    S: SessionStore,
{
    let Some(session) = sessions.read().await? else {
        return Ok(None);
    };

    if let Some(index) = session.store_index {
        if index >= directory.len() {
            tracing::warn!("Discarding stale session (store_index {})", index);
            sessions.clear().await?;
            return Ok(None);
        }
    }

    let store_name = match session.role {
        UserRole::Admin => None,
        UserRole::Client => session
            .store_index
            .and_then(|i| directory.get(i))
            .map(|s| s.base.description.clone()),
    };

    Ok(Some(AccessGranted {
        session,
        store_name,
    }))
}

/// Drop the persisted session
pub async fn logout<S: SessionStore>(sessions: &S) -> anyhow::Result<()> {
    sessions.clear().await?;
    tracing::info!("Session cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_store::repository::StoreRepository;
    use async_trait::async_trait;
    use contracts::domain::a001_store::aggregate::{Store, StoreId};
    use std::sync::Mutex;

    struct NullRepository;

    #[async_trait]
    impl StoreRepository for NullRepository {
        async fn list(&self) -> anyhow::Result<Vec<Store>> {
            Ok(Vec::new())
        }
        async fn upsert(&self, store: &Store) -> anyhow::Result<Store> {
            Ok(store.clone())
        }
        async fn delete(&self, _id: StoreId) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    #[derive(Default)]
    struct MemorySessionStore {
        slot: Mutex<Option<SessionInfo>>,
    }

    #[async_trait]
    impl SessionStore for MemorySessionStore {
        async fn persist(&self, session: &SessionInfo) -> anyhow::Result<()> {
            *self.slot.lock().unwrap() = Some(*session);
            Ok(())
        }
        async fn read(&self) -> anyhow::Result<Option<SessionInfo>> {
            Ok(*self.slot.lock().unwrap())
        }
        async fn clear(&self) -> anyhow::Result<()> {
            *self.slot.lock().unwrap() = None;
            Ok(())
        }
    }

    struct FailingSessionStore;

    #[async_trait]
    impl SessionStore for FailingSessionStore {
        async fn persist(&self, _session: &SessionInfo) -> anyhow::Result<()> {
            anyhow::bail!("storage unavailable")
        }
        async fn read(&self) -> anyhow::Result<Option<SessionInfo>> {
            anyhow::bail!("storage unavailable")
        }
        async fn clear(&self) -> anyhow::Result<()> {
            anyhow::bail!("storage unavailable")
        }
    }

    fn store(code: &str) -> Store {
        Store::new_for_insert(
            code.into(),
            format!("Loja {}", code),
            "Comércio LTDA".into(),
            "Gerente".into(),
        )
    }

    async fn directory_with(codes: &[&str]) -> StoreDirectory<NullRepository> {
        let mut dir = StoreDirectory::new(NullRepository);
        for code in codes {
            dir.add(store(code)).await.unwrap();
        }
        dir
    }

    fn admin_request(code: &str) -> AccessRequest {
        AccessRequest {
            code: code.into(),
            mode: AccessMode::Admin,
        }
    }

    fn client_request(code: &str) -> AccessRequest {
        AccessRequest {
            code: code.into(),
            mode: AccessMode::Client,
        }
    }

    #[tokio::test]
    async fn admin_secret_grants_global_session() {
        let dir = directory_with(&["LOJA-1", "LOJA-2"]).await;
        let sessions = MemorySessionStore::default();

        let granted = authorize(&admin_request("1234"), &dir, &sessions, "1234")
            .await
            .unwrap();
        assert_eq!(granted.session.role, UserRole::Admin);
        assert_eq!(granted.session.store_index, Some(0));
        assert!(granted.store_name.is_none());
        assert_eq!(sessions.read().await.unwrap(), Some(granted.session));
    }

    #[tokio::test]
    async fn admin_over_empty_directory_has_no_selection() {
        let dir = directory_with(&[]).await;
        let sessions = MemorySessionStore::default();

        let granted = authorize(&admin_request("1234"), &dir, &sessions, "1234")
            .await
            .unwrap();
        assert_eq!(granted.session.store_index, None);
    }

    #[tokio::test]
    async fn wrong_admin_secret_is_refused_in_portuguese() {
        let dir = directory_with(&["LOJA-1"]).await;
        let sessions = MemorySessionStore::default();

        let err = authorize(&admin_request("4321"), &dir, &sessions, "1234")
            .await
            .unwrap_err();
        assert!(err.is_refusal());
        assert_eq!(
            err.to_string(),
            "Senha administrativa incorreta. Acesso negado."
        );
        assert!(sessions.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_code_never_opens_the_admin_branch() {
        let dir = directory_with(&["LOJA-1"]).await;
        let sessions = MemorySessionStore::default();

        // valid store code, but the caller asked for ADMIN
        let err = authorize(&admin_request("LOJA-1"), &dir, &sessions, "1234")
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::InvalidAdminSecret));
    }

    #[tokio::test]
    async fn client_code_resolves_store_by_position() {
        let dir = directory_with(&["LOJA-1", "LOJA-2"]).await;
        let sessions = MemorySessionStore::default();

        let granted = authorize(&client_request("LOJA-2"), &dir, &sessions, "1234")
            .await
            .unwrap();
        assert_eq!(granted.session.role, UserRole::Client);
        assert_eq!(granted.session.store_index, Some(1));
        assert_eq!(granted.store_name.as_deref(), Some("Loja LOJA-2"));
    }

    #[tokio::test]
    async fn unknown_store_code_is_refused_in_portuguese() {
        let dir = directory_with(&["LOJA-1"]).await;
        let sessions = MemorySessionStore::default();

        let err = authorize(&client_request("LOJA-9"), &dir, &sessions, "1234")
            .await
            .unwrap_err();
        assert!(err.is_refusal());
        assert_eq!(
            err.to_string(),
            "Identificador da loja inválido. Verifique o código e tente novamente."
        );
    }

    #[tokio::test]
    async fn admin_secret_never_opens_the_client_branch() {
        let dir = directory_with(&["LOJA-1"]).await;
        let sessions = MemorySessionStore::default();

        let err = authorize(&client_request("1234"), &dir, &sessions, "1234")
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::UnknownStoreCode));
    }

    #[tokio::test]
    async fn unpersistable_session_is_not_granted() {
        let dir = directory_with(&["LOJA-1"]).await;

        let err = authorize(&client_request("LOJA-1"), &dir, &FailingSessionStore, "1234")
            .await
            .unwrap_err();
        assert!(!err.is_refusal());
    }

    #[tokio::test]
    async fn resume_round_trips_a_client_session() {
        let dir = directory_with(&["LOJA-1", "LOJA-2"]).await;
        let sessions = MemorySessionStore::default();
        authorize(&client_request("LOJA-2"), &dir, &sessions, "1234")
            .await
            .unwrap();

        let resumed = resume(&dir, &sessions).await.unwrap().unwrap();
        assert_eq!(resumed.session.role, UserRole::Client);
        assert_eq!(resumed.session.store_index, Some(1));
        assert_eq!(resumed.store_name.as_deref(), Some("Loja LOJA-2"));
    }

    #[tokio::test]
    async fn stale_store_index_clears_the_session() {
        let sessions = MemorySessionStore::default();
        sessions
            .persist(&SessionInfo {
                role: UserRole::Client,
                store_index: Some(5),
            })
            .await
            .unwrap();

        let dir = directory_with(&["LOJA-1"]).await;
        assert!(resume(&dir, &sessions).await.unwrap().is_none());
        assert!(sessions.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_clears_the_slot() {
        let dir = directory_with(&["LOJA-1"]).await;
        let sessions = MemorySessionStore::default();
        authorize(&client_request("LOJA-1"), &dir, &sessions, "1234")
            .await
            .unwrap();

        logout(&sessions).await.unwrap();
        assert!(resume(&dir, &sessions).await.unwrap().is_none());
    }
}
