use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;

/// A selectable allergen. Parents (e.g. `tree_nuts`) carry their
/// more specific children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllergenItem {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AllergenItem>,
}

impl AllergenItem {
    fn leaf(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            children: Vec::new(),
        }
    }

    fn parent(id: &'static str, label: &'static str, children: Vec<AllergenItem>) -> Self {
        Self {
            id,
            label,
            children,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllergenCategory {
    pub category: &'static str,
    pub items: Vec<AllergenItem>,
}

/// The allergen catalog shown on the settings screen, grouped by category.
/// Every recognized preference key appears here exactly once.
pub static ALLERGEN_CATEGORIES: LazyLock<Vec<AllergenCategory>> = LazyLock::new(|| {
    use AllergenItem as I;
    vec![
        AllergenCategory {
            category: "Dairy",
            items: vec![
                I::leaf("milk", "Milk"),
                I::leaf("lactose", "Lactose"),
                I::leaf("butter", "Butter"),
                I::leaf("cheese", "Cheese"),
            ],
        },
        AllergenCategory {
            category: "Eggs",
            items: vec![I::leaf("eggs", "Eggs")],
        },
        AllergenCategory {
            category: "Nuts & Seeds",
            items: vec![
                I::leaf("peanuts", "Peanuts"),
                I::parent(
                    "tree_nuts",
                    "Tree Nuts",
                    vec![
                        I::leaf("almonds", "Almonds"),
                        I::leaf("cashews", "Cashews"),
                        I::leaf("walnuts", "Walnuts"),
                        I::leaf("pecans", "Pecans"),
                        I::leaf("hazelnuts", "Hazelnuts"),
                        I::leaf("pistachios", "Pistachios"),
                        I::leaf("macadamia", "Macadamia"),
                        I::leaf("brazil_nuts", "Brazil Nuts"),
                    ],
                ),
                I::leaf("sesame", "Sesame"),
            ],
        },
        AllergenCategory {
            category: "Grains",
            items: vec![
                I::leaf("wheat", "Wheat"),
                I::leaf("gluten", "Gluten"),
                I::leaf("barley", "Barley"),
                I::leaf("rye", "Rye"),
                I::leaf("oats", "Oats"),
                I::leaf("corn", "Corn"),
            ],
        },
        AllergenCategory {
            category: "Seafood",
            items: vec![
                I::leaf("fish", "Fish"),
                I::parent(
                    "shellfish",
                    "Shellfish",
                    vec![
                        I::leaf("shrimp", "Shrimp"),
                        I::leaf("crab", "Crab"),
                        I::leaf("lobster", "Lobster"),
                        I::leaf("clams", "Clams"),
                        I::leaf("mussels", "Mussels"),
                        I::leaf("oysters", "Oysters"),
                    ],
                ),
            ],
        },
        AllergenCategory {
            category: "Legumes",
            items: vec![
                I::leaf("soybeans", "Soybeans"),
                I::leaf("lupin", "Lupin"),
                I::leaf("chickpeas", "Chickpeas"),
            ],
        },
        AllergenCategory {
            category: "Vegetables",
            items: vec![I::leaf("celery", "Celery"), I::leaf("mustard", "Mustard")],
        },
        AllergenCategory {
            category: "Additives",
            items: vec![I::leaf("sulfites", "Sulfites"), I::leaf("msg", "MSG")],
        },
    ]
});

/// Flat id -> label map, derived from [`ALLERGEN_CATEGORIES`].
pub static ALLERGEN_DISPLAY_NAMES: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut names = BTreeMap::new();
        for item in all_items() {
            names.insert(item.id, item.label);
        }
        names
    });

/// Catalog revision, bumped whenever ids or labels change.
pub const CATALOG_VERSION: &str = "1.0";

/// Every catalog item in settings-screen order, parents before their children.
pub fn all_items() -> impl Iterator<Item = &'static AllergenItem> {
    ALLERGEN_CATEGORIES
        .iter()
        .flat_map(|c| c.items.iter())
        .flat_map(|item| std::iter::once(item).chain(item.children.iter()))
}

pub fn all_ids() -> impl Iterator<Item = &'static str> {
    all_items().map(|item| item.id)
}

pub fn find_item(id: &str) -> Option<&'static AllergenItem> {
    all_items().find(|item| item.id == id)
}

pub fn catalog_label(id: &str) -> Option<&'static str> {
    ALLERGEN_DISPLAY_NAMES.get(id).copied()
}
