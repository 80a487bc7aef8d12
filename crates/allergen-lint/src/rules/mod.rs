//! Built-in lint rules.

pub mod display_name_drift;
pub mod orphan_children;
pub mod substring_overlap;
pub mod unknown_preference;

pub use display_name_drift::DisplayNameDriftRule;
pub use orphan_children::OrphanChildrenRule;
pub use substring_overlap::SubstringOverlapRule;
pub use unknown_preference::UnknownPreferenceRule;
