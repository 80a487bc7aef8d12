use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize, Serializer};

use crate::catalog::AllergenItem;

/// Storage key of the persisted preference map.
pub const ALLERGENS_KEY: &str = "@allergen_preferences";
/// Storage key of the onboarding flag.
pub const SETUP_COMPLETE_KEY: &str = "@setup_complete";
/// Storage key of the scan history list.
pub const SEARCH_HISTORY_KEY: &str = "@search_history";

/// User allergen selections, keyed by canonical allergen id.
///
/// Keys that are absent count as `false`. On deserialization any value
/// other than JSON `true` is treated as not selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, serde_json::Value>")]
pub struct AllergenPreferences {
    flags: BTreeMap<String, bool>,
}

impl From<HashMap<String, serde_json::Value>> for AllergenPreferences {
    fn from(raw: HashMap<String, serde_json::Value>) -> Self {
        let flags = raw
            .into_iter()
            .map(|(k, v)| (k, v == serde_json::Value::Bool(true)))
            .collect();
        Self { flags }
    }
}

impl Serialize for AllergenPreferences {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.flags.serialize(serializer)
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for AllergenPreferences {
    fn from_iter<T: IntoIterator<Item = (K, bool)>>(iter: T) -> Self {
        Self {
            flags: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl AllergenPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the value stored under [`ALLERGENS_KEY`]. A missing or
    /// unreadable value yields an empty set.
    pub fn from_storage(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::default();
        };
        match serde_json::from_str(raw) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!("Ignoring unreadable allergen preferences: {e}");
                Self::default()
            }
        }
    }

    /// Serialize for storage under [`ALLERGENS_KEY`].
    pub fn to_storage(&self) -> String {
        serde_json::to_string(&self.flags).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: impl Into<String>, enabled: bool) {
        self.flags.insert(key.into(), enabled);
    }

    /// Keys set to `true`, in ascending order.
    pub fn active_keys(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(k, _)| k.as_str())
    }

    /// Every stored key, selected or not.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn selected_count(&self) -> usize {
        self.active_keys().count()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Onboarding is complete once at least one allergen is selected.
    pub fn setup_complete(&self) -> bool {
        self.selected_count() > 0
    }

    /// Flip an item. A parent's children follow the parent's new value.
    /// Returns the new value.
    pub fn toggle(&mut self, item: &AllergenItem) -> bool {
        let enabled = !self.is_enabled(item.id);
        self.set(item.id, enabled);
        for child in &item.children {
            self.set(child.id, enabled);
        }
        enabled
    }

    /// A leaf is checked when selected; a parent when all its children are.
    pub fn is_parent_checked(&self, item: &AllergenItem) -> bool {
        if item.has_children() {
            item.children.iter().all(|c| self.is_enabled(c.id))
        } else {
            self.is_enabled(item.id)
        }
    }
}
