//! Checkout quote endpoint.
//!
//! The money boundary: cart lines are converted to minor-unit amounts here,
//! in the shape the payment collaborator consumes. Payment itself is out of
//! scope.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::CartItem;
use crate::AppState;

/// Request body: the cart lines to quote.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuoteRequest {
    pub items: Vec<CartItem>,
}

/// One quoted line with its unit amount in minor units (cents).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub name: String,
    pub unit_amount: i64,
    pub quantity: u32,
}

/// Full quote: line items plus the order total in minor units.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuoteResponse {
    pub currency: String,
    pub lines: Vec<QuoteLine>,
    pub total_amount: i64,
}

/// Convert a price to minor units, rounding to the nearest cent.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// POST /api/checkout/quote - Build a payment-ready quote from cart lines.
pub async fn checkout_quote(
    State(_state): State<AppState>,
    Json(request): Json<CheckoutQuoteRequest>,
) -> ApiResult<CheckoutQuoteResponse> {
    if request.items.is_empty() {
        return error(AppError::Validation("Cart is empty".to_string()));
    }

    let lines: Vec<QuoteLine> = request
        .items
        .iter()
        .map(|item| QuoteLine {
            name: item.product.name.clone(),
            unit_amount: to_minor_units(item.product.price),
            quantity: item.quantity,
        })
        .collect();

    let total_amount = lines
        .iter()
        .map(|line| line.unit_amount * line.quantity as i64)
        .sum();

    success(CheckoutQuoteResponse {
        currency: "usd".to_string(),
        lines,
        total_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_unit_conversion_rounds() {
        assert_eq!(to_minor_units(69.99), 6999);
        assert_eq!(to_minor_units(10.0), 1000);
        assert_eq!(to_minor_units(0.005), 1);
        assert_eq!(to_minor_units(0.0), 0);
    }
}
