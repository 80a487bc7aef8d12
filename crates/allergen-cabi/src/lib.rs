//! C ABI bindings for the allergen matcher.
//!
//! All functions use C-compatible string types:
//! - Input: `*const c_char` (null-terminated C string, null allowed where noted)
//! - Output: `*mut c_char` (caller must free with `allergen_free_string`)
//!
//! This crate builds as a cdylib for the native app shells (Swift, Kotlin/JNI).

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use allergen_core::{catalog_to_json, check_product_to_json, match_to_json, toggle_preference_to_json};

/// Match allergen tags against preferences.
///
/// A null `tags_json` or `options_json` is treated as absent.
///
/// # Safety
/// - Each non-null argument must be a valid null-terminated UTF-8 string.
/// - The returned pointer must be freed with `allergen_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn allergen_match(
    tags_json: *const c_char,
    preferences_json: *const c_char,
    options_json: *const c_char,
) -> *mut c_char {
    let tags = match unsafe { read_str(tags_json, "tags_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    let prefs = match unsafe { read_str(preferences_json, "preferences_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    let options = match unsafe { read_str(options_json, "options_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };

    to_c_string(&match_to_json(tags, prefs, options))
}

/// Check a product lookup response body against preferences.
///
/// # Safety
/// - Each non-null argument must be a valid null-terminated UTF-8 string.
/// - The returned pointer must be freed with `allergen_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn allergen_check_product(
    product_json: *const c_char,
    preferences_json: *const c_char,
    options_json: *const c_char,
) -> *mut c_char {
    let product = match unsafe { read_str(product_json, "product_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    let prefs = match unsafe { read_str(preferences_json, "preferences_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    let options = match unsafe { read_str(options_json, "options_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };

    to_c_string(&check_product_to_json(product, prefs, options))
}

/// Return the allergen catalog tree as JSON.
///
/// The returned pointer must be freed with `allergen_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn allergen_catalog() -> *mut c_char {
    to_c_string(&catalog_to_json())
}

/// Toggle one allergen (and its children) and return the updated preferences.
///
/// # Safety
/// - Both arguments must be valid null-terminated UTF-8 strings.
/// - The returned pointer must be freed with `allergen_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn allergen_toggle_preference(
    preferences_json: *const c_char,
    id: *const c_char,
) -> *mut c_char {
    let prefs = match unsafe { read_str(preferences_json, "preferences_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    let id = match unsafe { read_str(id, "id") } {
        Ok(s) => s,
        Err(e) => return e,
    };

    to_c_string(&toggle_preference_to_json(prefs, id))
}

/// Free a string previously returned by one of the allergen_* functions.
///
/// # Safety
/// - `ptr` must be a pointer previously returned by one of the allergen_* functions,
///   or null (in which case this is a no-op).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn allergen_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Borrow a C string argument. Null reads as the empty string, which the
/// JSON functions treat as absent. Invalid UTF-8 yields a ready-made error
/// envelope.
unsafe fn read_str<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, *mut c_char> {
    if ptr.is_null() {
        return Ok("");
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().map_err(|_| {
        let error = serde_json::json!({
            "success": false,
            "error": format!("Invalid UTF-8 in {name}"),
        });
        to_c_string(&error.to_string())
    })
}

/// Helper: Convert a Rust string to a C-compatible heap-allocated string.
fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s)
        .or_else(|_| CString::new(s.replace('\0', "")))
        .unwrap_or_default()
        .into_raw()
}
