//! Locally persisted set of favorite ids.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dogland_core::types::DbId;

use crate::error::FavoritesError;

pub type FavoriteIds = BTreeSet<DbId>;

/// Storage backend for the favorites set.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Load the stored set; an absent store yields an empty set.
    async fn load(&self) -> Result<FavoriteIds, FavoritesError>;

    /// Replace the stored set.
    async fn save(&self, ids: &FavoriteIds) -> Result<(), FavoritesError>;
}

/// Favorites kept as a JSON array in a local file.
#[derive(Debug, Clone)]
pub struct JsonFileFavoritesStore {
    path: PathBuf,
}

impl JsonFileFavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl FavoritesStore for JsonFileFavoritesStore {
    async fn load(&self) -> Result<FavoriteIds, FavoritesError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(FavoriteIds::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, ids: &FavoriteIds) -> Result<(), FavoritesError> {
        let bytes = serde_json::to_vec(ids)?;

        // Write next to the target and rename so readers never see a
        // half-written file.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), count = ids.len(), "Favorites saved");
        Ok(())
    }
}

/// In-memory store with switchable write failures.
#[derive(Debug, Default)]
pub struct MemoryFavoritesStore {
    ids: Mutex<FavoriteIds>,
    fail_saves: AtomicBool,
}

impl MemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: impl IntoIterator<Item = DbId>) -> Self {
        Self {
            ids: Mutex::new(ids.into_iter().collect()),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Make every following `save` fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// What a successful `save` last stored.
    pub fn stored(&self) -> FavoriteIds {
        self.ids.lock().map(|ids| ids.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl FavoritesStore for MemoryFavoritesStore {
    async fn load(&self) -> Result<FavoriteIds, FavoritesError> {
        Ok(self.stored())
    }

    async fn save(&self, ids: &FavoriteIds) -> Result<(), FavoritesError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(FavoritesError::Unavailable("storage is read-only".into()));
        }
        let mut stored = self
            .ids
            .lock()
            .map_err(|_| FavoritesError::Unavailable("store lock poisoned".into()))?;
        *stored = ids.clone();
        Ok(())
    }
}
