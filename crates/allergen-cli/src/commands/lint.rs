use std::path::Path;

use allergen_lint::{LintConfig, LintSeverity, LintTarget, Linter};

use crate::reader::read_preferences;

pub fn run_lint(prefs_path: Option<&Path>, format: &str) -> Result<String, String> {
    let prefs = prefs_path.map(read_preferences).transpose()?;
    let source = prefs_path
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| allergen_lint::CATALOG_SOURCE.to_string());

    let target = match &prefs {
        Some(p) => LintTarget::with_preferences(&source, p),
        None => LintTarget::catalog(),
    };

    let linter = Linter::new(LintConfig::default());
    let results = linter.lint(&target);

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "diagnostics": results,
                "summary": {
                    "count": results.len(),
                    "source": source,
                }
            }))
            .map_err(|e| format!("JSON serialization error: {e}"))?;
            Ok(json)
        }
        "sarif" => {
            let sarif = build_sarif(&results, &linter);
            serde_json::to_string_pretty(&sarif)
                .map_err(|e| format!("SARIF serialization error: {e}"))
        }
        _ => {
            // Human-readable format
            let mut lines: Vec<String> = Vec::new();

            for d in &results {
                lines.push(format!(
                    "{}:{} {}[{}]: {}",
                    d.source,
                    d.key,
                    severity_name(&d.severity),
                    d.rule,
                    d.message
                ));
            }

            let count = results.len();
            let issue_word = if count == 1 { "issue" } else { "issues" };
            lines.push(format!("{count} lint {issue_word} in {source}."));

            Ok(lines.join("\n"))
        }
    }
}

fn severity_name(severity: &LintSeverity) -> &'static str {
    match severity {
        LintSeverity::Error => "error",
        LintSeverity::Warning => "warning",
        LintSeverity::Info => "info",
    }
}

fn sarif_level(severity: &LintSeverity) -> &'static str {
    match severity {
        LintSeverity::Error => "error",
        LintSeverity::Warning => "warning",
        LintSeverity::Info => "note",
    }
}

fn build_sarif(results: &[allergen_lint::LintDiagnostic], linter: &Linter) -> serde_json::Value {
    let rule_descriptors: Vec<serde_json::Value> = linter
        .rules()
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id(),
                "shortDescription": { "text": r.description() },
                "defaultConfiguration": { "level": sarif_level(&r.default_severity()) }
            })
        })
        .collect();

    let sarif_results: Vec<serde_json::Value> = results
        .iter()
        .map(|d| {
            serde_json::json!({
                "ruleId": d.rule,
                "level": sarif_level(&d.severity),
                "message": { "text": d.message },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": { "uri": d.source }
                    },
                    "logicalLocations": [{ "name": d.key, "kind": "member" }]
                }]
            })
        })
        .collect();

    serde_json::json!({
        "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "allergen-lint",
                    "version": env!("CARGO_PKG_VERSION"),
                    "rules": rule_descriptors
                }
            },
            "results": sarif_results
        }]
    })
}
