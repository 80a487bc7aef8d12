//! Rule: unknown-preference
//!
//! Reports preference keys that are not in the allergen catalog. Such keys
//! still match tags but have no settings-screen toggle.

use allergen_core::catalog::catalog_label;

use crate::{LintDiagnostic, LintRule, LintSeverity, LintTarget};

pub struct UnknownPreferenceRule;

impl LintRule for UnknownPreferenceRule {
    fn id(&self) -> &str {
        "unknown-preference"
    }

    fn description(&self) -> &str {
        "Preference keys should exist in the allergen catalog"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }

    fn check(&self, target: &LintTarget<'_>) -> Vec<LintDiagnostic> {
        let Some(prefs) = target.preferences else {
            return Vec::new();
        };

        prefs
            .keys()
            .filter(|key| catalog_label(key).is_none())
            .map(|key| {
                self.diagnostic(
                    target,
                    key,
                    format!("Preference \"{key}\" is not a catalog allergen"),
                )
            })
            .collect()
    }
}
