//! Allergen linter — configurable rules for catalog and preference quality.
//!
//! Provides a trait-based rule framework that audits the static allergen
//! catalog, optionally together with a user's preference set, and reports
//! lint diagnostics.

mod rules;

use allergen_core::AllergenPreferences;
pub use rules::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Source name used when linting the catalog on its own.
pub const CATALOG_SOURCE: &str = "<catalog>";

// ---------------------------------------------------------------------------
// Lint severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    Error,
    Warning,
    Info,
}

// ---------------------------------------------------------------------------
// Lint diagnostic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintDiagnostic {
    pub rule: String,
    pub severity: LintSeverity,
    /// Preference file name, or [`CATALOG_SOURCE`].
    pub source: String,
    /// Allergen key the diagnostic is about.
    pub key: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Lint target
// ---------------------------------------------------------------------------

/// What a rule inspects: the catalog is always in scope, a preference set
/// only when one was supplied.
#[derive(Debug, Clone, Copy)]
pub struct LintTarget<'a> {
    pub source: &'a str,
    pub preferences: Option<&'a AllergenPreferences>,
}

impl<'a> LintTarget<'a> {
    pub fn catalog() -> Self {
        Self {
            source: CATALOG_SOURCE,
            preferences: None,
        }
    }

    pub fn with_preferences(source: &'a str, preferences: &'a AllergenPreferences) -> Self {
        Self {
            source,
            preferences: Some(preferences),
        }
    }
}

// ---------------------------------------------------------------------------
// Lint rule trait
// ---------------------------------------------------------------------------

/// Trait that all lint rules must implement.
pub trait LintRule: Send + Sync {
    /// Unique rule identifier (e.g., "substring-overlap").
    fn id(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Default severity.
    fn default_severity(&self) -> LintSeverity;

    /// Run the rule and return diagnostics.
    fn check(&self, target: &LintTarget<'_>) -> Vec<LintDiagnostic>;

    fn diagnostic(&self, target: &LintTarget<'_>, key: &str, message: String) -> LintDiagnostic {
        LintDiagnostic {
            rule: self.id().into(),
            severity: self.default_severity(),
            source: target.source.into(),
            key: key.into(),
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// Lint configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    #[default]
    Warn,
    Error,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(default)]
    pub rules: HashMap<String, RuleLevel>,
}

impl LintConfig {
    /// Check if a rule is enabled (not off).
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        !matches!(self.rules.get(rule_id), Some(RuleLevel::Off))
    }

    /// Get the configured severity for a rule, or its default.
    pub fn severity_for(&self, rule: &dyn LintRule) -> LintSeverity {
        match self.rules.get(rule.id()) {
            Some(RuleLevel::Error) => LintSeverity::Error,
            Some(RuleLevel::Warn) => LintSeverity::Warning,
            Some(RuleLevel::Off) => LintSeverity::Warning,
            None => rule.default_severity(),
        }
    }
}

// ---------------------------------------------------------------------------
// Linter engine
// ---------------------------------------------------------------------------

pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
    config: LintConfig,
}

impl Linter {
    /// Create a new linter with all built-in rules.
    pub fn new(config: LintConfig) -> Self {
        Self {
            rules: builtin_rules(),
            config,
        }
    }

    /// Get a reference to the registered rules.
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Run all enabled rules against the target.
    pub fn lint(&self, target: &LintTarget<'_>) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for rule in &self.rules {
            if self.config.is_enabled(rule.id()) {
                let severity = self.config.severity_for(rule.as_ref());
                let mut results = rule.check(target);
                for d in &mut results {
                    d.severity = severity.clone();
                }
                diagnostics.extend(results);
            }
        }

        diagnostics
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(LintConfig::default())
    }
}

/// Return all built-in lint rules.
fn builtin_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(DisplayNameDriftRule),
        Box::new(SubstringOverlapRule),
        Box::new(UnknownPreferenceRule),
        Box::new(OrphanChildrenRule),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
