//! The shopping cart store: line items, mutations, totals, persistence.

use chrono::Utc;

use crate::errors::AppError;
use crate::models::{CartItem, CartView, Product, Size, StoredCartPayload};

use super::CartStorage;

/// Fixed storage key for the cart blob, one per client scope.
pub const STORAGE_KEY: &str = "leenas-cart";

/// Persisted carts older than this are discarded on load.
pub const CART_TTL_MS: i64 = 2 * 24 * 60 * 60 * 1000; // 2 days

/// Authoritative set of cart lines for one client, persisted after every
/// mutation. Single-writer: mutations are never interleaved.
pub struct CartStore<S: CartStorage> {
    storage: S,
    items: Vec<CartItem>,
}

impl<S: CartStorage> CartStore<S> {
    /// Restore a cart from storage, applying the TTL and legacy-format rules.
    pub fn open(storage: S) -> Self {
        Self::open_at(storage, Utc::now().timestamp_millis())
    }

    /// Restore with an explicit "now" in epoch milliseconds.
    pub fn open_at(storage: S, now_ms: i64) -> Self {
        let items = load_initial_items(&storage, now_ms);
        Self { storage, items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Running total: Σ price × quantity over current lines.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.product.price * item.quantity as f64)
            .sum()
    }

    pub fn view(&self) -> CartView {
        CartView {
            items: self.items.clone(),
            total: self.total(),
        }
    }

    /// Add one unit of `(product, size)`: increments the existing line or
    /// creates a new one with quantity 1. The product is snapshotted.
    pub fn add_to_cart(&mut self, product: Product, size: Size) -> Result<(), AppError> {
        match self
            .items
            .iter_mut()
            .find(|i| i.matches(&product.id, size))
        {
            Some(existing) => existing.quantity += 1,
            None => self.items.push(CartItem {
                product,
                size,
                quantity: 1,
            }),
        }
        self.persist()
    }

    /// Remove the matching line; no-op when absent.
    pub fn remove_from_cart(&mut self, product_id: &str, size: Size) -> Result<(), AppError> {
        self.items.retain(|i| !i.matches(product_id, size));
        self.persist()
    }

    /// Set a line's quantity. Zero removes the line; a positive quantity for
    /// a missing line creates it with that quantity.
    pub fn update_quantity(
        &mut self,
        product: Product,
        size: Size,
        quantity: u32,
    ) -> Result<(), AppError> {
        if quantity == 0 {
            return self.remove_from_cart(&product.id, size);
        }

        match self
            .items
            .iter_mut()
            .find(|i| i.matches(&product.id, size))
        {
            Some(existing) => existing.quantity = quantity,
            None => self.items.push(CartItem {
                product,
                size,
                quantity,
            }),
        }
        self.persist()
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) -> Result<(), AppError> {
        self.items.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), AppError> {
        self.persist_at(Utc::now().timestamp_millis())
    }

    fn persist_at(&self, now_ms: i64) -> Result<(), AppError> {
        let payload = StoredCartPayload {
            items: self.items.clone(),
            saved_at: now_ms,
        };
        let raw = serde_json::to_string(&payload)?;
        self.storage.save(STORAGE_KEY, &raw)
    }
}

/// Read and validate the persisted payload. Expired payloads are deleted from
/// storage; legacy bare-array payloads load without expiry; corrupt or
/// unreadable state falls back to an empty cart.
fn load_initial_items<S: CartStorage>(storage: &S, now_ms: i64) -> Vec<CartItem> {
    let raw = match storage.load(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!("Failed to read cart from storage: {}", err);
            return Vec::new();
        }
    };

    if let Ok(payload) = serde_json::from_str::<StoredCartPayload>(&raw) {
        let age = now_ms - payload.saved_at;
        if age > CART_TTL_MS {
            if let Err(err) = storage.remove(STORAGE_KEY) {
                tracing::warn!("Failed to drop expired cart payload: {}", err);
            }
            return Vec::new();
        }
        return payload.items;
    }

    // Backward compatibility: a bare array of items, stored without expiry.
    if let Ok(items) = serde_json::from_str::<Vec<CartItem>>(&raw) {
        return items;
    }

    tracing::warn!("Discarding malformed cart payload");
    Vec::new()
}
