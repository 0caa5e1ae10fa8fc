//! In-memory store directory: the ordered collection of store records for
//! the running session, synchronized with the repository on every mutation.
//!
//! The directory is a cache over the repository. A mutation that fails to
//! persist is never visible in memory.

use super::repository::{SqlStoreRepository, StoreRepository};
use contracts::domain::a001_store::aggregate::Store;
use once_cell::sync::OnceCell;
use tokio::sync::RwLock;

pub struct StoreDirectory<R: StoreRepository> {
    repo: R,
    stores: Vec<Store>,
}

impl<R: StoreRepository> StoreDirectory<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            stores: Vec::new(),
        }
    }

    /// Replace the whole in-memory sequence with the repository's contents.
    ///
    /// On repository failure the directory degrades to empty rather than
    /// keeping stale state; an empty directory is a valid condition, not an
    /// error.
    pub async fn load(&mut self) {
        match self.repo.list().await {
            Ok(stores) => {
                tracing::info!("Directory loaded: {} store(s)", stores.len());
                self.stores = stores;
            }
            Err(e) => {
                tracing::warn!("Directory load failed, starting empty: {}", e);
                self.stores.clear();
            }
        }
    }

    /// First store whose code matches exactly (case-sensitive)
    pub fn find_by_code(&self, code: &str) -> Option<(usize, &Store)> {
        self.stores
            .iter()
            .enumerate()
            .find(|(_, s)| s.base.code == code)
    }

    pub fn get(&self, index: usize) -> Option<&Store> {
        self.stores.get(index)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.to_string_id() == id)
    }

    pub fn all(&self) -> &[Store] {
        &self.stores
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Append a new store. Persist first: the in-memory sequence grows only
    /// after the repository accepted the record.
    pub async fn add(&mut self, store: Store) -> anyhow::Result<Store> {
        store
            .validate()
            .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
        let stored = self.repo.upsert(&store).await?;
        self.stores.push(stored.clone());
        Ok(stored)
    }

    /// Replace the store with the same id, keeping its position. Persist
    /// first; on repository failure the in-memory entry is untouched.
    pub async fn replace(&mut self, store: Store) -> anyhow::Result<Store> {
        store
            .validate()
            .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
        let position = self
            .stores
            .iter()
            .position(|s| s.base.id == store.base.id)
            .ok_or_else(|| anyhow::anyhow!("Store {} not in directory", store.to_string_id()))?;
        let stored = self.repo.upsert(&store).await?;
        self.stores[position] = stored.clone();
        Ok(stored)
    }

    /// Soft-delete a store and drop it from the sequence on success
    pub async fn remove(&mut self, id: &str) -> anyhow::Result<bool> {
        let Some(position) = self.stores.iter().position(|s| s.to_string_id() == id) else {
            return Ok(false);
        };
        let store_id = self.stores[position].base.id;
        let deleted = self.repo.delete(store_id).await?;
        if deleted {
            self.stores.remove(position);
        }
        Ok(deleted)
    }
}

// ============================================================================
// Process-wide directory instance
// ============================================================================

static DIRECTORY: OnceCell<RwLock<StoreDirectory<SqlStoreRepository>>> = OnceCell::new();

/// Initialize the global directory and load it from the repository.
/// Called once at startup, after the database connection is up.
pub async fn initialize_directory() {
    let mut directory = StoreDirectory::new(SqlStoreRepository);
    directory.load().await;
    if DIRECTORY.set(RwLock::new(directory)).is_err() {
        tracing::warn!("Directory already initialized");
    }
}

pub fn directory() -> &'static RwLock<StoreDirectory<SqlStoreRepository>> {
    DIRECTORY
        .get()
        .expect("Store directory has not been initialized")
}
