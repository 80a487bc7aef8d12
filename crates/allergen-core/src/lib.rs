pub mod catalog;
pub mod ffi;
pub mod history;
pub mod matcher;
pub mod preferences;
pub mod product;
pub mod tags;
pub mod types;

pub use catalog::{catalog_label, find_item, ALLERGEN_CATEGORIES, ALLERGEN_DISPLAY_NAMES, CATALOG_VERSION};
pub use ffi::{catalog_to_json, check_product_to_json, match_to_json, toggle_preference_to_json};
pub use history::{NewHistoryItem, SearchHistory, SearchHistoryItem, MAX_HISTORY};
pub use matcher::{match_allergens, Matcher};
pub use preferences::AllergenPreferences;
pub use product::{Product, ProductError, ProductResponse, SearchResponse};
pub use tags::{display_name, normalize_tag};
pub use types::*;
