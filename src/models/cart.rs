//! Cart line items and the persisted cart payload.

use serde::{Deserialize, Serialize};

use super::{Product, Size};

/// One cart line, keyed by `(product.id, size)`.
///
/// `product` is a snapshot taken at add time, not a live reference to the
/// catalog entry: the cart keeps showing the price the shopper saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    pub size: Size,
    pub quantity: u32,
}

impl CartItem {
    /// Whether this line matches the given `(product id, size)` key.
    pub fn matches(&self, product_id: &str, size: Size) -> bool {
        self.product.id == product_id && self.size == size
    }
}

/// Durable cart payload written to storage after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCartPayload {
    pub items: Vec<CartItem>,
    /// Epoch milliseconds at write time; drives the load-time TTL check.
    pub saved_at: i64,
}

/// Request body for adding one unit of a product to the cart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product: Product,
    pub size: Size,
}

/// Request body for setting a line's quantity. Quantity 0 removes the line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    pub product: Product,
    pub size: Size,
    pub quantity: u32,
}

/// Request body for removing a cart line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartItemRequest {
    pub product_id: String,
    pub size: Size,
}

/// Cart state returned to clients: the lines plus the running total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: f64,
}
