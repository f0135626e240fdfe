//! Product model matching the frontend Product interface.

use serde::{Deserialize, Serialize};

/// Garment size offered for a product.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
}

impl Size {
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::XS => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "XS" => Some(Size::XS),
            "S" => Some(Size::S),
            "M" => Some(Size::M),
            "L" => Some(Size::L),
            "XL" => Some(Size::XL),
            _ => None,
        }
    }
}

/// A catalog entry.
///
/// Timestamps travel as RFC 3339 strings; a missing `created_at` sorts as
/// epoch (oldest) when ordering the latest-products collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default)]
    pub is_latest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request body for creating or replacing a product.
///
/// `id` is optional on create; the server assigns a UUID when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProductRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default)]
    pub is_latest: bool,
}

/// Request body for deleting products by id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductsRequest {
    pub ids: Vec<String>,
}
