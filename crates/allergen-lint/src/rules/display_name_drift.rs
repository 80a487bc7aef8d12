//! Rule: display-name-drift
//!
//! Reports allergens whose catalog label differs from the name the matcher
//! generates from the key, so the settings screen and the scan result show
//! different text for the same allergen.

use allergen_core::catalog::{all_items, catalog_label};
use allergen_core::tags::display_name;

use crate::{LintDiagnostic, LintRule, LintSeverity, LintTarget};

pub struct DisplayNameDriftRule;

impl LintRule for DisplayNameDriftRule {
    fn id(&self) -> &str {
        "display-name-drift"
    }

    fn description(&self) -> &str {
        "Catalog labels should match the generated display names"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Info
    }

    fn check(&self, target: &LintTarget<'_>) -> Vec<LintDiagnostic> {
        let keys: Vec<&str> = match target.preferences {
            Some(prefs) => prefs.active_keys().collect(),
            None => all_items().map(|item| item.id).collect(),
        };

        keys.into_iter()
            .filter_map(|key| {
                let label = catalog_label(key)?;
                let generated = display_name(key);
                (label != generated).then(|| {
                    self.diagnostic(
                        target,
                        key,
                        format!(
                            "Allergen \"{key}\" is labelled \"{label}\" in the catalog but reported as \"{generated}\""
                        ),
                    )
                })
            })
            .collect()
    }
}
