//! Allergen tag matching.
//!
//! Tags from the product database are compared with the user's active
//! preference keys using a permissive three-way test: equality, tag
//! contains key, or key contains tag. Compound tags such as
//! `en:milk-powder` therefore flag `milk`. Over-warning is preferred to
//! missing an allergen.

use std::collections::BTreeSet;

use crate::catalog::catalog_label;
use crate::preferences::AllergenPreferences;
use crate::tags::{display_name, language_prefix, normalize_tag};
use crate::types::*;

/// Match tags against preferences with generated display names.
///
/// Absent and empty tag lists behave the same. Never fails.
pub fn match_allergens<S: AsRef<str>>(
    tags: Option<&[S]>,
    preferences: &AllergenPreferences,
) -> AllergenMatchResult {
    Matcher::default().match_tags(tags, preferences)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    options: MatchOptions,
}

impl Matcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn match_tags<S: AsRef<str>>(
        &self,
        tags: Option<&[S]>,
        preferences: &AllergenPreferences,
    ) -> AllergenMatchResult {
        let names: BTreeSet<String> = self
            .explain(tags, preferences)
            .into_iter()
            .map(|e| e.display_name)
            .collect();
        AllergenMatchResult::from_names(names)
    }

    /// Every matching (tag, preference) pair, ordered by preference key
    /// then by tag.
    pub fn explain<S: AsRef<str>>(
        &self,
        tags: Option<&[S]>,
        preferences: &AllergenPreferences,
    ) -> Vec<MatchEvidence> {
        let tags = match tags {
            Some(t) if !t.is_empty() => t,
            _ => {
                tracing::debug!("No allergen tags on product");
                return Vec::new();
            }
        };

        let active: Vec<&str> = preferences.active_keys().collect();
        if active.is_empty() {
            tracing::debug!("No active allergen preferences");
            return Vec::new();
        }

        let mut evidence = Vec::new();
        for tag in tags {
            let tag = tag.as_ref();
            let normalized = normalize_tag(tag);
            let language = language_prefix(tag);
            // An empty tag is a substring of every key, so it flags them all.
            for key in &active {
                let Some(kind) = compare(&normalized, &key.to_lowercase()) else {
                    continue;
                };
                tracing::trace!(tag, key, kind = kind.as_str(), "allergen matched");
                evidence.push(MatchEvidence {
                    tag: tag.to_string(),
                    normalized_tag: normalized.clone(),
                    language: language.clone(),
                    preference_key: key.to_string(),
                    display_name: self.display_name_for(key),
                    kind,
                });
            }
        }

        evidence.sort_by(|a, b| {
            a.preference_key
                .cmp(&b.preference_key)
                .then_with(|| a.tag.cmp(&b.tag))
        });
        evidence
    }

    fn display_name_for(&self, key: &str) -> String {
        match self.options.display_names {
            DisplayNames::Generated => display_name(key),
            DisplayNames::Catalog => catalog_label(key)
                .map(str::to_string)
                .unwrap_or_else(|| display_name(key)),
        }
    }
}

fn compare(tag: &str, key: &str) -> Option<MatchKind> {
    if tag == key {
        Some(MatchKind::Exact)
    } else if tag.contains(key) {
        Some(MatchKind::TagContainsKey)
    } else if key.contains(tag) {
        Some(MatchKind::KeyContainsTag)
    } else {
        None
    }
}
