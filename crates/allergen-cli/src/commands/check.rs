use std::fs;
use std::path::{Path, PathBuf};

use allergen_core::{
    AllergenMatchResult, AllergenPreferences, DisplayNames, MatchEvidence, MatchOptions, Matcher,
    ProductResponse,
};

use crate::reader::{read_config, read_preferences, read_product_files};
use crate::MatchSettings;

const DISCLAIMER: &str =
    "Allergen data comes from OpenFoodFacts.org and may be incomplete. Always read the product label.";

/// Preferences and options resolved from flags, falling back to
/// allergen.config.yaml in the current directory.
struct Resolved {
    prefs: AllergenPreferences,
    options: MatchOptions,
    prefs_path: Option<PathBuf>,
}

fn resolve(settings: &MatchSettings) -> Result<Resolved, String> {
    let config = read_config(Path::new("."))?.unwrap_or_default();

    let prefs_path = settings.prefs.clone().or(config.preferences);
    let mut prefs = match &prefs_path {
        Some(path) => read_preferences(path)?,
        None => AllergenPreferences::new(),
    };
    for key in &settings.allergens {
        prefs.set(key.as_str(), true);
    }
    if prefs.selected_count() == 0 {
        tracing::warn!("No allergens selected; nothing will be flagged");
    }

    let display_names = match settings.display_names.as_deref() {
        Some(s) => s.parse()?,
        None => config.display_names.unwrap_or(DisplayNames::Generated),
    };

    Ok(Resolved {
        prefs,
        options: MatchOptions { display_names },
        prefs_path,
    })
}

/// Match tags given on the command line. Returns the output and the
/// number of flagged products (0 or 1).
pub fn run_match(tags: &[String], settings: &MatchSettings) -> Result<(String, usize), String> {
    let Resolved { prefs, options, .. } = resolve(settings)?;
    let matcher = Matcher::new(options);
    let result = matcher.match_tags(Some(tags), &prefs);
    let evidence = if settings.explain {
        matcher.explain(Some(tags), &prefs)
    } else {
        Vec::new()
    };
    let flagged = usize::from(result.has_allergens);

    if settings.format == "json" {
        let mut output = serde_json::to_value(&result)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        if settings.explain {
            output["evidence"] = serde_json::to_value(&evidence)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
        }
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        return Ok((json, flagged));
    }

    let mut lines = vec![verdict(&result)];
    lines.extend(explain_lines(&evidence));
    lines.push(DISCLAIMER.to_string());
    Ok((lines.join("\n"), flagged))
}

/// Check one lookup response, or every `*.json` response in a directory.
pub fn run_check(input_path: &Path, settings: &MatchSettings) -> Result<(String, usize), String> {
    let Resolved {
        prefs,
        options,
        prefs_path,
    } = resolve(settings)?;

    // A JSON preference file inside the scanned directory is not a product.
    let prefs_path = prefs_path.and_then(|p| fs::canonicalize(p).ok());
    let files: Vec<_> = read_product_files(input_path)?
        .into_iter()
        .filter(|file| {
            prefs_path.is_none() || fs::canonicalize(&file.path).ok() != prefs_path
        })
        .collect();
    if files.is_empty() {
        return Err(format!(
            "No product files (.json) found at: {}",
            input_path.display()
        ));
    }

    let matcher = Matcher::new(options);

    let mut reports = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    let mut flagged = 0;
    let mut failed = 0;

    for file in &files {
        let product = match ProductResponse::from_json(&file.content).and_then(|r| r.into_product())
        {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(file = %file.path, "skipping: {e}");
                failed += 1;
                lines.push(format!("{}: error: {e}", file.path));
                reports.push(serde_json::json!({ "file": file.path, "error": e.to_string() }));
                continue;
            }
        };

        let result = matcher.match_tags(product.allergen_tags(), &prefs);
        if result.has_allergens {
            flagged += 1;
        }

        let title = match product.brands() {
            Some(brands) => format!("{} ({brands})", product.display_name()),
            None => product.display_name().to_string(),
        };
        lines.push(format!("{}: {title}", file.path));
        lines.push(format!("  {}", verdict(&result)));

        let mut report = serde_json::json!({
            "file": file.path,
            "product": {
                "name": product.display_name(),
                "brands": product.brands(),
                "image": product.image(),
            },
            "result": result,
        });
        if settings.explain {
            let evidence = matcher.explain(product.allergen_tags(), &prefs);
            for line in explain_lines(&evidence) {
                lines.push(format!("  {line}"));
            }
            report["evidence"] = serde_json::to_value(&evidence)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
        }
        reports.push(report);
    }

    if settings.format == "json" {
        let output = serde_json::json!({
            "products": reports,
            "summary": {
                "checked": files.len(),
                "flagged": flagged,
                "failed": failed,
            }
        });
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        return Ok((json, flagged));
    }

    let product_word = if files.len() == 1 { "product" } else { "products" };
    lines.push(format!(
        "{} {product_word} checked, {flagged} flagged, {failed} failed.",
        files.len()
    ));
    lines.push(DISCLAIMER.to_string());
    Ok((lines.join("\n"), flagged))
}

fn verdict(result: &AllergenMatchResult) -> String {
    if result.has_allergens {
        format!(
            "ALLERGENS DETECTED: {}",
            result.detected_allergens.join(", ")
        )
    } else {
        "No flagged allergens found.".to_string()
    }
}

fn explain_lines(evidence: &[MatchEvidence]) -> Vec<String> {
    evidence
        .iter()
        .map(|e| match &e.language {
            Some(lang) => format!(
                "  {} <- {} ({}, lang {lang})",
                e.preference_key,
                e.tag,
                e.kind.as_str()
            ),
            None => format!(
                "  {} <- {} ({})",
                e.preference_key,
                e.tag,
                e.kind.as_str()
            ),
        })
        .collect()
}
