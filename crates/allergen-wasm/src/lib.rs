//! Allergen matcher WASM bindings.
//!
//! Provides JavaScript-callable functions via wasm-bindgen.
//! All functions take string inputs and return JSON strings.

use allergen_core::{catalog_to_json, check_product_to_json, match_to_json, toggle_preference_to_json};
use wasm_bindgen::prelude::*;

/// Match allergen tags against preferences.
///
/// @param tags_json - JSON array of tag strings, or `null`
/// @param preferences_json - JSON object `{ [allergen]: boolean }`
/// @param options_json - JSON options `{ displayNames?: "generated" | "catalog" }`, may be empty
/// @returns JSON string with `{ success: boolean, data?: { hasAllergens, detectedAllergens }, error?: string }`
#[wasm_bindgen(js_name = "match")]
pub fn wasm_match(tags_json: &str, preferences_json: &str, options_json: &str) -> String {
    match_to_json(tags_json, preferences_json, options_json)
}

/// Check a product lookup response against preferences.
///
/// @param product_json - Body of `/product/<barcode>.json`
/// @param preferences_json - JSON object `{ [allergen]: boolean }`
/// @param options_json - JSON options, may be empty
/// @returns JSON string with `{ success: boolean, data?: { product, result }, error?: string }`
#[wasm_bindgen(js_name = "checkProduct")]
pub fn wasm_check_product(product_json: &str, preferences_json: &str, options_json: &str) -> String {
    check_product_to_json(product_json, preferences_json, options_json)
}

/// The allergen catalog grouped by category.
#[wasm_bindgen(js_name = "catalog")]
pub fn wasm_catalog() -> String {
    catalog_to_json()
}

/// Toggle an allergen (and its children).
///
/// @param preferences_json - JSON object `{ [allergen]: boolean }`
/// @param id - Catalog allergen id, e.g. `tree_nuts`
/// @returns JSON string with `{ success: boolean, data?: { preferences, enabled, selectedCount, setupComplete }, error?: string }`
#[wasm_bindgen(js_name = "togglePreference")]
pub fn wasm_toggle_preference(preferences_json: &str, id: &str) -> String {
    toggle_preference_to_json(preferences_json, id)
}
