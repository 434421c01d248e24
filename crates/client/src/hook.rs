//! Client data hooks: one cached list resource with favorites.
//!
//! A hook moves `Idle → Loading → Success | Error` on every
//! [`ResourceHook::refetch`]. The last successful result set survives a
//! failed refetch. Favorite toggles are applied optimistically and rolled
//! back exactly when the favorites store refuses the write.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use dogland_core::types::{DbId, LookupId};

use crate::api::{ApiClient, ListParams};
use crate::error::{ClientError, FavoritesError};
use crate::favorites::{FavoriteIds, FavoritesStore};
use crate::models::Resource;

/// Where a hook gets its rows from.
#[async_trait]
pub trait ResourceSource<T>: Send + Sync {
    async fn fetch(&self) -> Result<Vec<T>, ClientError>;
}

/// Fetches one page of a list resource from the API.
pub struct ApiSource<T> {
    client: ApiClient,
    params: ListParams,
    _resource: PhantomData<fn() -> T>,
}

impl<T> ApiSource<T> {
    pub fn new(client: ApiClient, params: ListParams) -> Self {
        Self {
            client,
            params,
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Resource> ResourceSource<T> for ApiSource<T> {
    async fn fetch(&self) -> Result<Vec<T>, ClientError> {
        Ok(self.client.list::<T>(&self.params).await?.items)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Success,
    /// The last fetch failed; the message is suitable for display.
    Error(String),
}

/// A cached row with its favorite flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Listed<T> {
    pub item: T,
    pub is_favorite: bool,
}

/// Local filters applied by [`ResourceHook::get_filtered`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookFilters {
    pub species_id: Option<LookupId>,
    pub breed_id: Option<LookupId>,
    pub favorites_only: bool,
}

impl HookFilters {
    fn matches<T: Resource>(&self, listed: &Listed<T>) -> bool {
        if self.favorites_only && !listed.is_favorite {
            return false;
        }
        if let Some(species_id) = self.species_id {
            if listed.item.species_id() != Some(species_id) {
                return false;
            }
        }
        if let Some(breed_id) = self.breed_id {
            if listed.item.breed_id() != Some(breed_id) {
                return false;
            }
        }
        true
    }
}

pub struct ResourceHook<T> {
    source: Box<dyn ResourceSource<T>>,
    store: Arc<dyn FavoritesStore>,
    state: FetchState,
    items: Vec<Listed<T>>,
    favorites: FavoriteIds,
}

impl<T: Resource> ResourceHook<T> {
    pub fn new(source: impl ResourceSource<T> + 'static, store: Arc<dyn FavoritesStore>) -> Self {
        Self {
            source: Box::new(source),
            store,
            state: FetchState::Idle,
            items: Vec::new(),
            favorites: FavoriteIds::new(),
        }
    }

    /// Hook over one page of `T` from the API.
    pub fn from_api(client: ApiClient, params: ListParams, store: Arc<dyn FavoritesStore>) -> Self {
        Self::new(ApiSource::new(client, params), store)
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn items(&self) -> &[Listed<T>] {
        &self.items
    }

    pub fn favorites(&self) -> &FavoriteIds {
        &self.favorites
    }

    pub fn is_favorite(&self, id: DbId) -> bool {
        self.favorites.contains(&id)
    }

    /// Read the persisted favorites and re-flag the cached rows.
    pub async fn load_favorites(&mut self) -> Result<(), FavoritesError> {
        self.favorites = self.store.load().await?;
        for listed in &mut self.items {
            listed.is_favorite = self.favorites.contains(&listed.item.id());
        }
        Ok(())
    }

    /// Fetch the resource again.
    ///
    /// On failure the previously cached rows are kept and the state moves
    /// to [`FetchState::Error`]. `&mut self` keeps one fetch in flight per
    /// hook.
    pub async fn refetch(&mut self) -> &FetchState {
        self.state = FetchState::Loading;

        match self.source.fetch().await {
            Ok(rows) => {
                self.items = rows
                    .into_iter()
                    .map(|item| Listed {
                        is_favorite: self.favorites.contains(&item.id()),
                        item,
                    })
                    .collect();
                self.state = FetchState::Success;
            }
            Err(err) => {
                tracing::warn!(resource = T::PATH, error = %err, "Refetch failed");
                self.state = FetchState::Error(err.to_string());
            }
        }
        &self.state
    }

    /// Flip `id` in the favorites set and persist it.
    ///
    /// Returns whether `id` is a favorite afterwards. When the store fails,
    /// the favorites set and the cached rows are restored to their exact
    /// state before the call.
    pub async fn toggle_favorite(&mut self, id: DbId) -> Result<bool, FavoritesError> {
        let favorites_snapshot = self.favorites.clone();
        let items_snapshot = self.items.clone();

        let now_favorite = if self.favorites.remove(&id) {
            false
        } else {
            self.favorites.insert(id);
            true
        };
        for listed in self.items.iter_mut().filter(|l| l.item.id() == id) {
            listed.is_favorite = now_favorite;
        }

        if let Err(err) = self.store.save(&self.favorites).await {
            tracing::warn!(id, error = %err, "Favorite toggle reverted");
            self.favorites = favorites_snapshot;
            self.items = items_snapshot;
            return Err(err);
        }

        Ok(now_favorite)
    }

    /// Cached rows matching `filters`, in cache order. No network access.
    pub fn get_filtered(&self, filters: &HookFilters) -> Vec<&Listed<T>> {
        self.items.iter().filter(|l| filters.matches(l)).collect()
    }
}
