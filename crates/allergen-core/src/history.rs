use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::AllergenMatchResult;

/// Number of scans kept, newest first.
pub const MAX_HISTORY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryItem {
    pub id: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Fields supplied by the caller; `id` and `timestamp` are assigned on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHistoryItem {
    pub product_name: String,
    pub barcode: Option<String>,
    pub allergens: Vec<String>,
    pub image_url: Option<String>,
}

impl NewHistoryItem {
    /// Describe a scanned product together with its allergen check.
    pub fn from_scan(product: &Product, barcode: Option<&str>, result: &AllergenMatchResult) -> Self {
        Self {
            product_name: product.display_name().to_string(),
            barcode: barcode.map(str::to_string),
            allergens: result.detected_allergens.clone(),
            image_url: product.image().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    items: Vec<SearchHistoryItem>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the list stored under the history key. Missing or unreadable
    /// data yields an empty history.
    pub fn from_storage(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::default();
        };
        match serde_json::from_str(raw) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("Ignoring unreadable search history: {e}");
                Self::default()
            }
        }
    }

    pub fn to_storage(&self) -> String {
        serde_json::to_string(&self.items).unwrap_or_else(|_| "[]".to_string())
    }

    /// Prepend an entry stamped with `now_millis` and drop anything past
    /// [`MAX_HISTORY`].
    pub fn add(&mut self, item: NewHistoryItem, now_millis: i64) -> &SearchHistoryItem {
        let entry = SearchHistoryItem {
            id: now_millis.to_string(),
            product_name: item.product_name,
            barcode: item.barcode,
            timestamp: now_millis,
            allergens: item.allergens,
            image_url: item.image_url,
        };
        self.items.insert(0, entry);
        self.items.truncate(MAX_HISTORY);
        &self.items[0]
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[SearchHistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
