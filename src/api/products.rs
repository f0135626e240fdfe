//! Product API endpoints: public catalog reads plus the admin editor surface.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    DeleteProductsRequest, FilterMode, Product, ProductFilterState, Size, UpsertProductRequest,
};
use crate::AppState;

/// Query parameters for the catalog filter endpoint.
///
/// `sizes` and `colors` are comma-separated lists.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sizes: Option<String>,
    #[serde(default)]
    pub colors: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl FilterQuery {
    fn into_filter_state(self) -> Result<ProductFilterState, AppError> {
        let mode = match self.mode.as_deref() {
            None | Some("") => FilterMode::All,
            Some(raw) => FilterMode::from_str(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown filter mode: {}", raw)))?,
        };

        let sizes = match self.sizes.as_deref() {
            None | Some("") => Vec::new(),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    Size::from_str(s)
                        .ok_or_else(|| AppError::Validation(format!("Unknown size: {}", s)))
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        let colors = match self.colors.as_deref() {
            None | Some("") => Vec::new(),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        };

        Ok(ProductFilterState {
            mode,
            search_term: self.q.unwrap_or_default(),
            sizes,
            colors,
            min_price: self.min_price,
            max_price: self.max_price,
        })
    }
}

/// Product list plus catalog status flags.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Admin upsert response: the canonical saved product plus the refreshed
/// full collection, so the editor can repaint without a second fetch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProductResponse {
    pub product: Product,
    pub products: Vec<Product>,
}

/// Admin delete response: rows removed plus the refreshed collection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductsResponse {
    pub deleted: u64,
    pub products: Vec<Product>,
}

/// GET /api/products - Full catalog with status flags.
pub async fn list_products(State(state): State<AppState>) -> ApiResult<ProductListResponse> {
    let products = state.catalog.all_products().await;
    let status = state.catalog.status().await;

    success(ProductListResponse {
        products,
        loading: status.loading,
        error: status.error,
    })
}

/// GET /api/products/filter - Catalog filtered by the query parameters.
pub async fn filter_products(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Vec<Product>> {
    let filters = match query.into_filter_state() {
        Ok(filters) => filters,
        Err(e) => return error(e),
    };

    success(state.catalog.filtered_with(&filters).await)
}

/// GET /api/products/:id - Single product lookup.
pub async fn get_product(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Product> {
    match state.catalog.get_by_id(&id).await {
        Some(product) => success(product),
        None => error(AppError::NotFound(format!("Product {} not found", id))),
    }
}

/// GET /api/collections/hot - Products flagged hot, in catalog order.
pub async fn hot_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    success(state.catalog.hot_products().await)
}

/// GET /api/collections/latest - Latest products, newest first.
pub async fn latest_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    success(state.catalog.latest_products().await)
}

/// PUT /api/products - Create or replace a product (admin).
pub async fn upsert_product(
    State(state): State<AppState>,
    Json(request): Json<UpsertProductRequest>,
) -> ApiResult<UpsertProductResponse> {
    // Validate required fields
    if request.name.trim().is_empty() {
        return error(AppError::Validation("Name is required".to_string()));
    }
    if request.category.trim().is_empty() {
        return error(AppError::Validation("Category is required".to_string()));
    }
    if !request.price.is_finite() || request.price < 0.0 {
        return error(AppError::Validation(
            "Price must be a non-negative number".to_string(),
        ));
    }

    match state.catalog.create(&request).await {
        Ok(product) => {
            let products = state.catalog.all_products().await;
            success(UpsertProductResponse { product, products })
        }
        Err(e) => error(e),
    }
}

/// DELETE /api/products - Delete products by id (admin).
pub async fn delete_products(
    State(state): State<AppState>,
    Json(request): Json<DeleteProductsRequest>,
) -> ApiResult<DeleteProductsResponse> {
    if request.ids.is_empty() {
        return error(AppError::Validation("ids array is required".to_string()));
    }

    match state.catalog.remove(&request.ids).await {
        Ok(deleted) => {
            let products = state.catalog.all_products().await;
            success(DeleteProductsResponse { deleted, products })
        }
        Err(e) => error(e),
    }
}
