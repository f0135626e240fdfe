//! Transient catalog filter state matching the frontend ProductFilterState.

use serde::{Deserialize, Serialize};

use super::Size;

/// Which base collection the filter runs over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Hot,
    Latest,
}

impl FilterMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(FilterMode::All),
            "hot" => Some(FilterMode::Hot),
            "latest" => Some(FilterMode::Latest),
            _ => None,
        }
    }
}

/// In-memory filter query over the catalog. Never persisted.
///
/// Empty `sizes`/`colors` mean "no constraint", not "match nothing".
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilterState {
    #[serde(default)]
    pub mode: FilterMode,
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
}
