use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn allergen_bin(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_allergen"));
    cmd.current_dir(dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("prefs.json"),
        r#"{"milk": true, "eggs": true, "peanuts": true, "soybeans": false}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("prefs.yaml"),
        "tree_nuts: true\nsesame: false\n",
    )
    .unwrap();
    dir
}

fn write_product(dir: &Path, name: &str, body: &str) {
    fs::create_dir_all(dir.join("products")).unwrap();
    fs::write(dir.join("products").join(name), body).unwrap();
}

#[test]
fn cli_help() {
    let dir = workspace();
    let output = allergen_bin(dir.path()).arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Allergen checker"));
}

#[test]
fn cli_version() {
    let dir = workspace();
    let output = allergen_bin(dir.path()).arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ---------------------------------------------------------------------------
// match
// ---------------------------------------------------------------------------

#[test]
fn cli_match_flags_allergens() {
    let dir = workspace();
    let output = allergen_bin(dir.path())
        .args(["match", "en:milk", "en:eggs", "en:soy-lecithin", "--prefs", "prefs.json"])
        .output()
        .expect("failed to run");
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ALLERGENS DETECTED: Eggs, Milk"), "stdout: {stdout}");
    assert!(stdout.contains("Always read the product label"));
}

#[test]
fn cli_match_clean_product() {
    let dir = workspace();
    let output = allergen_bin(dir.path())
        .args(["match", "en:celery", "--prefs", "prefs.json"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No flagged allergens found."));
}

#[test]
fn cli_match_json_with_explain() {
    let dir = workspace();
    let output = allergen_bin(dir.path())
        .args(["match", "en:milk-powder", "-a", "milk", "--format", "json", "--explain"])
        .output()
        .expect("failed to run");
    assert_eq!(output.status.code(), Some(2));
    let v: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    assert_eq!(v["hasAllergens"], true);
    assert_eq!(v["detectedAllergens"], serde_json::json!(["Milk"]));
    assert_eq!(v["evidence"][0]["kind"], "tag-contains-key");
    assert_eq!(v["evidence"][0]["normalizedTag"], "milk-powder");
}

#[test]
fn cli_match_yaml_prefs_and_catalog_names() {
    let dir = workspace();
    let output = allergen_bin(dir.path())
        .args([
            "match",
            "en:nuts",
            "en:sesame",
            "--prefs",
            "prefs.yaml",
            "--display-names",
            "catalog",
        ])
        .output()
        .expect("failed to run");
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ALLERGENS DETECTED: Tree Nuts\n"), "stdout: {stdout}");
}

#[test]
fn cli_match_uses_config_defaults() {
    let dir = workspace();
    fs::write(
        dir.path().join("allergen.config.yaml"),
        "preferences: prefs.yaml\ndisplay_names: catalog\n",
    )
    .unwrap();
    let output = allergen_bin(dir.path())
        .args(["match", "en:tree_nuts"])
        .output()
        .expect("failed to run");
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Tree Nuts"), "stdout: {stdout}");
}

#[test]
fn cli_match_bad_display_names() {
    let dir = workspace();
    let output = allergen_bin(dir.path())
        .args(["match", "en:milk", "--display-names", "fancy"])
        .output()
        .expect("failed to run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}

#[test]
fn cli_match_missing_prefs_file() {
    let dir = workspace();
    let output = allergen_bin(dir.path())
        .args(["match", "en:milk", "--prefs", "nope.json"])
        .output()
        .expect("failed to run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn cli_check_directory() {
    let dir = workspace();
    write_product(
        dir.path(),
        "a.json",
        r#"{"status":1,"product":{"product_name":"Brioche","brands":"Bakery","allergens_tags":["en:eggs","en:gluten","en:milk"]}}"#,
    );
    write_product(
        dir.path(),
        "b.json",
        r#"{"status":1,"product":{"product_name":"Apple juice","allergens_tags":[]}}"#,
    );
    write_product(dir.path(), "c.json", r#"{"status":0}"#);

    let output = allergen_bin(dir.path())
        .args(["check", "products", "--prefs", "prefs.json", "--format", "json"])
        .output()
        .expect("failed to run");
    assert_eq!(output.status.code(), Some(2));
    let v: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    assert_eq!(v["summary"]["checked"], 3);
    assert_eq!(v["summary"]["flagged"], 1);
    assert_eq!(v["summary"]["failed"], 1);

    let products = v["products"].as_array().unwrap();
    assert_eq!(products[0]["product"]["name"], "Brioche");
    assert_eq!(
        products[0]["result"]["detectedAllergens"],
        serde_json::json!(["Eggs", "Milk"])
    );
    assert_eq!(products[1]["result"]["hasAllergens"], false);
    assert_eq!(products[2]["error"], "Product not found");
}

#[test]
fn cli_check_single_file_human() {
    let dir = workspace();
    write_product(
        dir.path(),
        "bar.json",
        r#"{"status":1,"product":{"product_name_en":"Granola bar","allergens_tags":["en:oats"]}}"#,
    );
    let output = allergen_bin(dir.path())
        .args(["check", "products/bar.json", "--prefs", "prefs.json"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Granola bar"));
    assert!(stdout.contains("1 product checked, 0 flagged, 0 failed."));
}

#[test]
fn cli_check_current_dir_skips_prefs_file() {
    let dir = workspace();
    fs::write(
        dir.path().join("cookie.json"),
        r#"{"status":1,"product":{"product_name":"Cookie","allergens_tags":["en:milk"]}}"#,
    )
    .unwrap();
    let output = allergen_bin(dir.path())
        .args(["check", "--prefs", "prefs.json", "--format", "json"])
        .output()
        .expect("failed to run");
    assert_eq!(output.status.code(), Some(2));
    let v: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    assert_eq!(v["summary"]["checked"], 1);
    assert_eq!(v["summary"]["failed"], 0);
    assert_eq!(v["products"][0]["product"]["name"], "Cookie");
}

#[test]
fn cli_match_explain_shows_language() {
    let dir = workspace();
    let output = allergen_bin(dir.path())
        .args(["match", "fr:lait", "milk", "-a", "lait", "-a", "milk", "--explain"])
        .output()
        .expect("failed to run");
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lait <- fr:lait (exact, lang fr)"), "stdout: {stdout}");
    assert!(stdout.contains("milk <- milk (exact)\n"), "stdout: {stdout}");
}

#[test]
fn cli_check_nonexistent() {
    let dir = workspace();
    let output = allergen_bin(dir.path())
        .args(["check", "nonexistent/path"])
        .output()
        .expect("failed to run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Path does not exist"));
}

// ---------------------------------------------------------------------------
// catalog / lint
// ---------------------------------------------------------------------------

#[test]
fn cli_catalog_human() {
    let dir = workspace();
    let output = allergen_bin(dir.path()).arg("catalog").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Nuts & Seeds"));
    assert!(stdout.contains("brazil_nuts"));
    assert!(stdout.contains("37 allergens in 8 categories"));
}

#[test]
fn cli_catalog_json() {
    let dir = workspace();
    let output = allergen_bin(dir.path())
        .args(["catalog", "--format", "json"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    assert_eq!(v["categories"].as_array().unwrap().len(), 8);
}

#[test]
fn cli_lint_catalog() {
    let dir = workspace();
    let output = allergen_bin(dir.path()).arg("lint").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("info[display-name-drift]"));
    assert!(stdout.contains("warning[substring-overlap]"));
    assert!(stdout.contains("4 lint issues in <catalog>."));
}

#[test]
fn cli_lint_prefs_sarif() {
    let dir = workspace();
    fs::write(dir.path().join("odd.json"), r#"{"shellfish": true, "kiwi": true}"#).unwrap();
    let output = allergen_bin(dir.path())
        .args(["lint", "--prefs", "odd.json", "--format", "sarif"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    assert_eq!(v["version"], "2.1.0");
    let results = v["runs"][0]["results"].as_array().unwrap();
    let rules: Vec<&str> = results
        .iter()
        .map(|r| r["ruleId"].as_str().unwrap())
        .collect();
    assert!(rules.contains(&"unknown-preference"));
    assert!(rules.contains(&"orphan-children"));
}
