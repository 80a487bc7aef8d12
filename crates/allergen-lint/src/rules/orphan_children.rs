//! Rule: orphan-children
//!
//! Toggling a parent allergen sets all of its children to the same value.
//! A stored set with an enabled parent but disabled children was edited
//! some other way and no longer shows the parent as checked.

use allergen_core::catalog::all_items;

use crate::{LintDiagnostic, LintRule, LintSeverity, LintTarget};

pub struct OrphanChildrenRule;

impl LintRule for OrphanChildrenRule {
    fn id(&self) -> &str {
        "orphan-children"
    }

    fn description(&self) -> &str {
        "An enabled parent allergen should have all of its children enabled"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }

    fn check(&self, target: &LintTarget<'_>) -> Vec<LintDiagnostic> {
        let Some(prefs) = target.preferences else {
            return Vec::new();
        };

        let mut diagnostics = Vec::new();
        for item in all_items().filter(|i| i.has_children() && prefs.is_enabled(i.id)) {
            let missing: Vec<&str> = item
                .children
                .iter()
                .filter(|c| !prefs.is_enabled(c.id))
                .map(|c| c.id)
                .collect();
            if !missing.is_empty() {
                diagnostics.push(self.diagnostic(
                    target,
                    item.id,
                    format!(
                        "\"{}\" is enabled but these children are not: {}",
                        item.id,
                        missing.join(", ")
                    ),
                ));
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allergen_core::{find_item, AllergenPreferences};

    #[test]
    fn toggled_parent_is_clean() {
        let mut prefs = AllergenPreferences::new();
        prefs.toggle(find_item("shellfish").unwrap());
        let results = OrphanChildrenRule.check(&LintTarget::with_preferences("p.json", &prefs));
        assert!(results.is_empty());
    }

    #[test]
    fn hand_edited_parent_is_flagged() {
        let mut prefs = AllergenPreferences::new();
        prefs.toggle(find_item("shellfish").unwrap());
        prefs.set("crab", false);
        let results = OrphanChildrenRule.check(&LintTarget::with_preferences("p.json", &prefs));
        assert_eq!(results.len(), 1);
        assert!(results[0].message.ends_with("not: crab"));
    }
}
