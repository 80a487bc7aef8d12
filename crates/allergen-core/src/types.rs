use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Match result
// ---------------------------------------------------------------------------

/// Outcome of matching a product's allergen tags against user preferences.
///
/// `has_allergens` is true exactly when `detected_allergens` is non-empty.
/// `detected_allergens` holds distinct display names in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergenMatchResult {
    pub has_allergens: bool,
    pub detected_allergens: Vec<String>,
}

impl AllergenMatchResult {
    /// Build a result from display names in any order, possibly repeated.
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut detected: Vec<String> = names.into_iter().collect();
        detected.sort();
        detected.dedup();
        Self {
            has_allergens: !detected.is_empty(),
            detected_allergens: detected,
        }
    }

    pub fn is_safe(&self) -> bool {
        !self.has_allergens
    }
}

// ---------------------------------------------------------------------------
// Match options
// ---------------------------------------------------------------------------

/// Where display names for matched preferences come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayNames {
    /// First letter upper-cased, underscores replaced by spaces.
    #[default]
    Generated,
    /// Catalog label, falling back to the generated form for unknown keys.
    Catalog,
}

impl std::str::FromStr for DisplayNames {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generated" => Ok(DisplayNames::Generated),
            "catalog" => Ok(DisplayNames::Catalog),
            other => Err(format!(
                "Unknown display name source \"{other}\" (expected generated or catalog)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    #[serde(default)]
    pub display_names: DisplayNames,
}

// ---------------------------------------------------------------------------
// Match evidence
// ---------------------------------------------------------------------------

/// Which of the three comparisons produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    Exact,
    TagContainsKey,
    KeyContainsTag,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::TagContainsKey => "tag-contains-key",
            MatchKind::KeyContainsTag => "key-contains-tag",
        }
    }
}

/// One (tag, preference) pair that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvidence {
    pub tag: String,
    pub normalized_tag: String,
    /// Language code the tag was prefixed with, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub preference_key: String,
    pub display_name: String,
    pub kind: MatchKind,
}
