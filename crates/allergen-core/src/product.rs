//! Product records as returned by the Open Food Facts API.
//!
//! Only the fields the allergen check and history need are modelled;
//! everything else in the upstream record is ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound,

    #[error("No products found")]
    NoResults,

    #[error("Invalid product JSON: {0}")]
    InvalidJson(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_front_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens_tags: Option<Vec<String>>,
}

impl Product {
    /// Name shown to the user, falling back to the English name and
    /// finally to [`UNKNOWN_PRODUCT`].
    pub fn display_name(&self) -> &str {
        non_empty(&self.product_name)
            .or_else(|| non_empty(&self.product_name_en))
            .unwrap_or(UNKNOWN_PRODUCT)
    }

    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image_url).or_else(|| non_empty(&self.image_front_url))
    }

    pub fn brands(&self) -> Option<&str> {
        non_empty(&self.brands)
    }

    pub fn allergen_tags(&self) -> Option<&[String]> {
        self.allergens_tags.as_deref()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Body of `GET /product/<barcode>.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub product: Option<Product>,
}

impl ProductResponse {
    pub fn from_json(json: &str) -> ProductResult<Self> {
        serde_json::from_str(json).map_err(|e| ProductError::InvalidJson(e.to_string()))
    }

    /// The product, if the lookup succeeded (`status == 1`).
    pub fn into_product(self) -> ProductResult<Product> {
        match (self.status, self.product) {
            (1, Some(product)) => Ok(product),
            _ => Err(ProductError::NotFound),
        }
    }
}

/// Body of `GET /search?search_terms=<terms>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl SearchResponse {
    pub fn from_json(json: &str) -> ProductResult<Self> {
        serde_json::from_str(json).map_err(|e| ProductError::InvalidJson(e.to_string()))
    }

    pub fn into_products(self) -> ProductResult<Vec<Product>> {
        if self.count == 0 {
            return Err(ProductError::NoResults);
        }
        Ok(self.products)
    }
}

/// Endpoint for a barcode lookup.
pub fn product_url(base_url: &str, barcode: &str) -> String {
    format!(
        "{}/product/{}.json",
        base_url.trim_end_matches('/'),
        urlencoding::encode(barcode)
    )
}

/// Endpoint for a product-name search.
pub fn search_url(base_url: &str, terms: &str) -> String {
    format!(
        "{}/search?search_terms={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(terms)
    )
}
