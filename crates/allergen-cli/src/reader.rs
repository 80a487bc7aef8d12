use std::fs;
use std::path::{Path, PathBuf};

use allergen_core::{AllergenPreferences, DisplayNames};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "allergen.config.yaml";

/// A file with its path and content.
pub struct ProductFile {
    pub path: String,
    pub content: String,
}

/// Defaults from allergen.config.yaml.
#[derive(Debug, Default, Deserialize)]
pub struct AllergenConfig {
    pub preferences: Option<PathBuf>,
    pub display_names: Option<DisplayNames>,
}

/// Read allergen.config.yaml from a directory if it exists.
pub fn read_config(dir_path: &Path) -> Result<Option<AllergenConfig>, String> {
    let config_path = dir_path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read {}: {}", config_path.display(), e))?;
    let mut config: AllergenConfig = serde_yaml::from_str(&content)
        .map_err(|e| format!("Invalid YAML config {}: {}", config_path.display(), e))?;

    // Preference paths are relative to the config file.
    if let Some(prefs) = config.preferences.take() {
        config.preferences = Some(if prefs.is_relative() {
            dir_path.join(prefs)
        } else {
            prefs
        });
    }

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(Some(config))
}

/// Read a preference file. `.yaml`/`.yml` files are parsed as YAML,
/// everything else as JSON.
pub fn read_preferences(path: &Path) -> Result<AllergenPreferences, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let is_yaml = path
        .extension()
        .is_some_and(|e| e == "yaml" || e == "yml");

    if is_yaml {
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Invalid preferences in {}: {}", path.display(), e))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| format!("Invalid preferences in {}: {}", path.display(), e))
    }
}

/// Read product lookup responses from a path (file or directory of `*.json`).
pub fn read_product_files(input_path: &Path) -> Result<Vec<ProductFile>, String> {
    if !input_path.exists() {
        return Err(format!("Path does not exist: {}", input_path.display()));
    }

    if input_path.is_file() {
        let content = fs::read_to_string(input_path)
            .map_err(|e| format!("Failed to read {}: {}", input_path.display(), e))?;
        return Ok(vec![ProductFile {
            path: input_path.to_string_lossy().to_string(),
            content,
        }]);
    }

    if input_path.is_dir() {
        return scan_directory(input_path);
    }

    Err(format!(
        "Path is neither a file nor a directory: {}",
        input_path.display()
    ))
}

fn scan_directory(dir_path: &Path) -> Result<Vec<ProductFile>, String> {
    let pattern = dir_path.join("**/*.json");
    let pattern_str = pattern.to_string_lossy().replace('\\', "/");
    let entries = glob::glob(&pattern_str).map_err(|e| format!("Invalid glob pattern: {}", e))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => return Err(format!("Glob error: {}", e)),
        }
    }
    paths.sort();

    let mut files = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        files.push(ProductFile {
            path: path.to_string_lossy().to_string(),
            content,
        });
    }

    tracing::debug!(count = files.len(), dir = %dir_path.display(), "scanned product files");
    Ok(files)
}
