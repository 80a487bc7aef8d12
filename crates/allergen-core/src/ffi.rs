//! FFI-oriented JSON API for the mobile shell and other bindings.
//!
//! All functions take string inputs and return a JSON envelope
//! `{ "success": bool, "data"?: ..., "error"?: string }`.

use std::panic::{catch_unwind, UnwindSafe};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{find_item, AllergenCategory, ALLERGEN_CATEGORIES, CATALOG_VERSION};
use crate::matcher::Matcher;
use crate::preferences::AllergenPreferences;
use crate::product::ProductResponse;
use crate::types::*;

// ---------------------------------------------------------------------------
// Result types (serialized to JSON output)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FfiResult<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCheck {
    pub product: ProductSummary,
    pub result: AllergenMatchResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogPayload<'a> {
    version: &'static str,
    categories: &'a [AllergenCategory],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TogglePayload {
    preferences: AllergenPreferences,
    enabled: bool,
    selected_count: usize,
    setup_complete: bool,
}

// ---------------------------------------------------------------------------
// Public FFI functions
// ---------------------------------------------------------------------------

/// Match allergen tags against preferences.
///
/// Input: `tags_json` is a JSON array of strings or `null` (non-string
/// entries are skipped), `preferences_json` a flat `{ key: bool }` object,
/// `options_json` `{ "displayNames"?: "generated" | "catalog" }` or empty.
/// Output: envelope with an `AllergenMatchResult`.
pub fn match_to_json(tags_json: &str, preferences_json: &str, options_json: &str) -> String {
    let inputs = parse_tags(tags_json).and_then(|tags| {
        let prefs = parse_preferences(preferences_json)?;
        let options = parse_options(options_json)?;
        Ok((tags, prefs, options))
    });
    let (tags, prefs, options) = match inputs {
        Ok(v) => v,
        Err(e) => return failure(e),
    };

    envelope(move || Matcher::new(options).match_tags(tags.as_deref(), &prefs))
}

/// Check a product lookup response against preferences.
///
/// Input: the raw body of a product lookup, preferences and options as
/// for [`match_to_json`].
/// Output: envelope with `{ product: { name, brands?, image? }, result }`.
pub fn check_product_to_json(
    product_json: &str,
    preferences_json: &str,
    options_json: &str,
) -> String {
    let product = match ProductResponse::from_json(product_json).and_then(|r| r.into_product()) {
        Ok(p) => p,
        Err(e) => return failure(e.to_string()),
    };
    let prefs = match parse_preferences(preferences_json) {
        Ok(p) => p,
        Err(e) => return failure(e),
    };
    let options = match parse_options(options_json) {
        Ok(o) => o,
        Err(e) => return failure(e),
    };

    envelope(move || {
        let result = Matcher::new(options).match_tags(product.allergen_tags(), &prefs);
        ProductCheck {
            product: ProductSummary {
                name: product.display_name().to_string(),
                brands: product.brands().map(str::to_string),
                image: product.image().map(str::to_string),
            },
            result,
        }
    })
}

/// The allergen catalog tree for the settings screen.
pub fn catalog_to_json() -> String {
    envelope(|| CatalogPayload {
        version: CATALOG_VERSION,
        categories: ALLERGEN_CATEGORIES.as_slice(),
    })
}

/// Toggle one catalog item (cascading to its children) and return the
/// updated preferences.
pub fn toggle_preference_to_json(preferences_json: &str, id: &str) -> String {
    let mut prefs = match parse_preferences(preferences_json) {
        Ok(p) => p,
        Err(e) => return failure(e),
    };
    let Some(item) = find_item(id) else {
        return failure(format!("Unknown allergen \"{id}\""));
    };

    let enabled = prefs.toggle(item);
    let selected_count = prefs.selected_count();
    let setup_complete = prefs.setup_complete();
    envelope(move || TogglePayload {
        preferences: prefs,
        enabled,
        selected_count,
        setup_complete,
    })
}

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

fn parse_tags(tags_json: &str) -> Result<Option<Vec<String>>, String> {
    if tags_json.trim().is_empty() {
        return Ok(None);
    }
    let value: Value =
        serde_json::from_str(tags_json).map_err(|e| format!("Invalid tags JSON: {e}"))?;
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        )),
        other => Err(format!("Invalid tags JSON: expected array or null, got {other}")),
    }
}

fn parse_preferences(preferences_json: &str) -> Result<AllergenPreferences, String> {
    if preferences_json.trim().is_empty() {
        return Ok(AllergenPreferences::default());
    }
    serde_json::from_str(preferences_json).map_err(|e| format!("Invalid preferences JSON: {e}"))
}

fn parse_options(options_json: &str) -> Result<MatchOptions, String> {
    if options_json.trim().is_empty() {
        return Ok(MatchOptions::default());
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RawOptions {
        #[serde(default)]
        display_names: Option<String>,
    }

    let raw: RawOptions =
        serde_json::from_str(options_json).map_err(|e| format!("Invalid options JSON: {e}"))?;
    let display_names = match raw.display_names {
        Some(s) => s.parse()?,
        None => DisplayNames::default(),
    };
    Ok(MatchOptions { display_names })
}

// ---------------------------------------------------------------------------
// Envelope helpers
// ---------------------------------------------------------------------------

fn envelope<T, F>(f: F) -> String
where
    T: Serialize,
    F: FnOnce() -> T + UnwindSafe,
{
    match catch_unwind(f) {
        Ok(data) => {
            let ffi_result = FfiResult {
                success: true,
                data: Some(data),
                error: None,
            };
            serde_json::to_string(&ffi_result)
                .unwrap_or_else(|e| failure(format!("JSON serialization error: {e}")))
        }
        Err(_) => failure("Internal matcher panic".to_string()),
    }
}

fn failure(error: String) -> String {
    serde_json::to_string(&FfiResult::<()> {
        success: false,
        data: None,
        error: Some(error),
    })
    .unwrap_or_else(|_| r#"{"success":false,"error":"Unknown error"}"#.to_string())
}
