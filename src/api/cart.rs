//! Cart API endpoints, scoped per client session.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{AddToCartRequest, CartView, RemoveCartItemRequest, UpdateQuantityRequest};
use crate::AppState;

/// GET /api/cart/:session - Current cart lines and total.
pub async fn get_cart(State(state): State<AppState>, Path(session): Path<String>) -> ApiResult<CartView> {
    let view = state
        .carts
        .with_cart(&session, |cart| Ok(cart.view()))
        .await?;
    success(view)
}

/// POST /api/cart/:session/items - Add one unit of a product+size.
pub async fn add_cart_item(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(request): Json<AddToCartRequest>,
) -> ApiResult<CartView> {
    let view = state
        .carts
        .with_cart(&session, |cart| {
            cart.add_to_cart(request.product, request.size)?;
            Ok(cart.view())
        })
        .await?;
    success(view)
}

/// PUT /api/cart/:session/items - Set a line's quantity (0 removes it).
pub async fn update_cart_item(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> ApiResult<CartView> {
    let view = state
        .carts
        .with_cart(&session, |cart| {
            cart.update_quantity(request.product, request.size, request.quantity)?;
            Ok(cart.view())
        })
        .await?;
    success(view)
}

/// DELETE /api/cart/:session/items - Remove a line; absent lines are a no-op.
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(request): Json<RemoveCartItemRequest>,
) -> ApiResult<CartView> {
    let view = state
        .carts
        .with_cart(&session, |cart| {
            cart.remove_from_cart(&request.product_id, request.size)?;
            Ok(cart.view())
        })
        .await?;
    success(view)
}

/// DELETE /api/cart/:session - Empty the cart.
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> ApiResult<CartView> {
    let view = state
        .carts
        .with_cart(&session, |cart| {
            cart.clear()?;
            Ok(cart.view())
        })
        .await?;
    success(view)
}
