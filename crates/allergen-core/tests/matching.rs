use allergen_core::*;
use pretty_assertions::assert_eq;

fn prefs(entries: &[(&str, bool)]) -> AllergenPreferences {
    entries.iter().map(|(k, v)| (*k, *v)).collect()
}

fn matched(tags: &[&str], preferences: &AllergenPreferences) -> AllergenMatchResult {
    match_allergens(Some(tags), preferences)
}

fn none() -> AllergenMatchResult {
    AllergenMatchResult {
        has_allergens: false,
        detected_allergens: vec![],
    }
}

// ---------------------------------------------------------------------------
// Zero-value results
// ---------------------------------------------------------------------------

#[test]
fn absent_or_empty_tags_detect_nothing() {
    let p = prefs(&[("milk", true), ("eggs", true)]);
    assert_eq!(match_allergens::<&str>(None, &p), none());
    assert_eq!(matched(&[], &p), none());
    assert_eq!(match_allergens::<String>(Some(&[][..]), &AllergenPreferences::new()), none());
}

#[test]
fn inactive_preferences_detect_nothing() {
    let tags = ["en:milk", "en:eggs", "en:peanuts"];
    assert_eq!(matched(&tags, &AllergenPreferences::new()), none());
    assert_eq!(
        matched(&tags, &prefs(&[("milk", false), ("eggs", false)])),
        none()
    );
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[test]
fn matching_is_case_insensitive() {
    let p = prefs(&[("milk", true)]);
    assert_eq!(matched(&["EN:MILK"], &p), matched(&["en:milk"], &p));
    assert_eq!(matched(&["EN:MILK"], &p).detected_allergens, vec!["Milk"]);
}

#[test]
fn language_prefix_is_stripped() {
    let p = prefs(&[("lait", true)]);
    assert!(matched(&["fr:lait"], &p).has_allergens);
    assert!(matched(&["lait"], &p).has_allergens);
}

#[test]
fn compound_tags_match_by_substring() {
    let result = matched(&["en:milk_powder"], &prefs(&[("milk", true)]));
    assert_eq!(
        result,
        AllergenMatchResult {
            has_allergens: true,
            detected_allergens: vec!["Milk".into()],
        }
    );
}

#[test]
fn key_containing_tag_matches() {
    let result = matched(&["en:nuts"], &prefs(&[("tree_nuts", true)]));
    assert_eq!(result.detected_allergens, vec!["Tree nuts"]);
}

#[test]
fn bare_language_prefix_flags_every_active_allergen() {
    let p = prefs(&[("milk", true), ("eggs", true), ("soybeans", false)]);
    assert_eq!(
        matched(&["en:"], &p),
        AllergenMatchResult {
            has_allergens: true,
            detected_allergens: vec!["Eggs".into(), "Milk".into()],
        }
    );
}

// ---------------------------------------------------------------------------
// Result shape
// ---------------------------------------------------------------------------

#[test]
fn concrete_scenario_is_sorted_and_filtered() {
    let result = matched(
        &["en:milk", "en:eggs", "en:soy-lecithin"],
        &prefs(&[("milk", true), ("eggs", true), ("peanuts", true)]),
    );
    assert_eq!(
        result,
        AllergenMatchResult {
            has_allergens: true,
            detected_allergens: vec!["Eggs".into(), "Milk".into()],
        }
    );
}

#[test]
fn repeated_matches_are_deduplicated() {
    let result = matched(&["en:milk", "en:milk-derivative"], &prefs(&[("milk", true)]));
    assert_eq!(result.detected_allergens, vec!["Milk"]);
}

#[test]
fn generated_display_names_capitalize_first_word_only() {
    let result = matched(&["en:tree_nuts"], &prefs(&[("tree_nuts", true)]));
    assert_eq!(result.detected_allergens, vec!["Tree nuts"]);
}

#[test]
fn catalog_display_names_follow_catalog() {
    let matcher = Matcher::new(MatchOptions {
        display_names: DisplayNames::Catalog,
    });
    let tags = ["en:tree_nuts"];
    let result = matcher.match_tags(Some(&tags[..]), &prefs(&[("tree_nuts", true)]));
    assert_eq!(result.detected_allergens, vec!["Tree Nuts"]);
}

#[test]
fn has_allergens_tracks_detected_list() {
    let cases: &[&[&str]] = &[&[], &["en:gluten"], &["en:wheat", "en:celery"], &["en:fish"]];
    let p = prefs(&[("wheat", true), ("celery", true), ("gluten", false)]);
    for tags in cases {
        let result = matched(tags, &p);
        assert_eq!(result.has_allergens, !result.detected_allergens.is_empty());
    }
}

#[test]
fn matching_is_idempotent() {
    let tags = ["en:mustard", "en:celery", "en:sesame-seeds", "en:sulphur-dioxide-and-sulphites"];
    let p = prefs(&[("sesame", true), ("mustard", true), ("celery", true), ("sulfites", true)]);
    let first = matched(&tags, &p);
    let second = matched(&tags, &p);
    assert_eq!(first, second);
    assert_eq!(first.detected_allergens, vec!["Celery", "Mustard", "Sesame"]);
}

#[test]
fn result_serializes_in_camel_case() {
    let result = matched(&["en:eggs"], &prefs(&[("eggs", true)]));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "hasAllergens": true, "detectedAllergens": ["Eggs"] })
    );
}

#[test]
fn product_tags_feed_the_matcher() {
    let body = r#"{"status":1,"product":{"product_name":"Pad Thai","allergens_tags":["en:peanuts","en:crustaceans","en:eggs"]}}"#;
    let product = ProductResponse::from_json(body)
        .unwrap()
        .into_product()
        .unwrap();
    let result = match_allergens(product.allergen_tags(), &prefs(&[("peanuts", true), ("shrimp", true)]));
    assert_eq!(result.detected_allergens, vec!["Peanuts"]);
}
