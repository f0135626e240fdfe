//! In-memory catalog store backed by the database repository.
//!
//! Holds the full product collection plus derived hot/latest views and the
//! active filter state. Reads are served from memory; writes go through the
//! repository first and are then merged locally, so a failed write never
//! touches the in-memory collection.

use tokio::sync::RwLock;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{Product, ProductFilterState, UpsertProductRequest};

use super::{apply_filters, build_collections, upsert_in_list, ProductCollections};

/// Load/error status surfaced to clients alongside catalog data.
#[derive(Debug, Clone)]
pub struct CatalogStatus {
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct CatalogState {
    all_products: Vec<Product>,
    collections: ProductCollections,
    filters: ProductFilterState,
    loading: bool,
    error: Option<String>,
}

/// Stateful catalog container. One instance is shared across all handlers.
pub struct CatalogStore {
    repo: Repository,
    state: RwLock<CatalogState>,
}

impl CatalogStore {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            state: RwLock::new(CatalogState {
                loading: true,
                ..Default::default()
            }),
        }
    }

    /// Seed the store. A non-empty seed becomes the initial collection with
    /// no fetch; an empty seed triggers an immediate fetch-all.
    pub async fn initialize(&self, seed: Vec<Product>) {
        if seed.is_empty() {
            self.refresh().await;
            return;
        }

        let mut state = self.state.write().await;
        state.collections = build_collections(&seed);
        state.all_products = seed;
        state.loading = false;
        state.error = None;
    }

    /// Re-fetch the full collection and replace it wholesale.
    ///
    /// On failure the last-known collection is retained and the error flag is
    /// set. Overlapping refreshes are last-resolved-wins.
    pub async fn refresh(&self) {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        match self.repo.list_products().await {
            Ok(products) => {
                let mut state = self.state.write().await;
                state.collections = build_collections(&products);
                state.all_products = products;
                state.loading = false;
            }
            Err(err) => {
                tracing::error!("Error fetching products: {}", err);
                let mut state = self.state.write().await;
                state.error = Some("Failed to load products".to_string());
                state.loading = false;
            }
        }
    }

    /// Current load/error status.
    pub async fn status(&self) -> CatalogStatus {
        let state = self.state.read().await;
        CatalogStatus {
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    pub async fn all_products(&self) -> Vec<Product> {
        self.state.read().await.all_products.clone()
    }

    pub async fn hot_products(&self) -> Vec<Product> {
        self.state.read().await.collections.hot.clone()
    }

    pub async fn latest_products(&self) -> Vec<Product> {
        self.state.read().await.collections.latest.clone()
    }

    /// O(1) lookup by id; absence is not an error.
    pub async fn get_by_id(&self, id: &str) -> Option<Product> {
        self.state.read().await.collections.by_id.get(id).cloned()
    }

    /// Local-only merge: replace in place on id match, prepend otherwise.
    pub async fn upsert_local(&self, product: Product) {
        let mut state = self.state.write().await;
        let list = std::mem::take(&mut state.all_products);
        state.all_products = upsert_in_list(list, product);
        state.collections = build_collections(&state.all_products);
    }

    /// Local-only removal of one id.
    pub async fn remove_local(&self, id: &str) {
        let mut state = self.state.write().await;
        state.all_products.retain(|p| p.id != id);
        state.collections = build_collections(&state.all_products);
    }

    /// Persist a product through the repository, then merge the canonical
    /// saved record locally. The collection is untouched when the write fails.
    pub async fn create(&self, request: &UpsertProductRequest) -> Result<Product, AppError> {
        match self.repo.upsert_product(request).await {
            Ok(saved) => {
                self.upsert_local(saved.clone()).await;
                let mut state = self.state.write().await;
                state.error = None;
                Ok(saved)
            }
            Err(err) => {
                tracing::error!("Error saving product: {}", err);
                let mut state = self.state.write().await;
                state.error = Some("Failed to save product".to_string());
                Err(err)
            }
        }
    }

    /// Delete products through the repository, then drop them locally.
    pub async fn remove(&self, ids: &[String]) -> Result<u64, AppError> {
        let deleted = self.repo.delete_products(ids).await?;
        for id in ids {
            self.remove_local(id).await;
        }
        Ok(deleted)
    }

    /// Replace the active filter state.
    pub async fn set_filters(&self, filters: ProductFilterState) {
        self.state.write().await.filters = filters;
    }

    pub async fn filters(&self) -> ProductFilterState {
        self.state.read().await.filters.clone()
    }

    /// Products passing the active filter state.
    pub async fn filtered_products(&self) -> Vec<Product> {
        let state = self.state.read().await;
        apply_filters(
            &state.filters,
            &state.collections.latest,
            &state.collections.hot,
            &state.all_products,
        )
    }

    /// Products passing an ad hoc filter state, without touching the stored one.
    pub async fn filtered_with(&self, filters: &ProductFilterState) -> Vec<Product> {
        let state = self.state.read().await;
        apply_filters(
            filters,
            &state.collections.latest,
            &state.collections.hot,
            &state.all_products,
        )
    }
}
