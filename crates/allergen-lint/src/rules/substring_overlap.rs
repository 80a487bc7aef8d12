//! Rule: substring-overlap
//!
//! Detects pairs of allergen keys where one contains the other. Because
//! matching is substring based, a single product tag can then trigger
//! both (e.g. `en:fish` flags `fish` and `shellfish`).

use std::collections::BTreeSet;

use allergen_core::catalog::all_ids;

use crate::{LintDiagnostic, LintRule, LintSeverity, LintTarget};

pub struct SubstringOverlapRule;

impl LintRule for SubstringOverlapRule {
    fn id(&self) -> &str {
        "substring-overlap"
    }

    fn description(&self) -> &str {
        "Allergen keys should not contain one another"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }

    fn check(&self, target: &LintTarget<'_>) -> Vec<LintDiagnostic> {
        // Matching ignores key case, so `Milk` and `milk` are one key.
        let keys: BTreeSet<String> = match target.preferences {
            Some(prefs) => prefs.active_keys().map(str::to_lowercase).collect(),
            None => all_ids().map(str::to_string).collect(),
        };
        let keys: Vec<&String> = keys.iter().collect();

        let mut diagnostics = Vec::new();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                let (inner, outer) = if b.contains(a.as_str()) {
                    (a, b)
                } else if a.contains(b.as_str()) {
                    (b, a)
                } else {
                    continue;
                };
                diagnostics.push(self.diagnostic(
                    target,
                    outer.as_str(),
                    format!(
                        "Key \"{outer}\" contains \"{inner}\"; a \"{inner}\" tag will also flag \"{outer}\""
                    ),
                ));
            }
        }

        diagnostics
    }
}
