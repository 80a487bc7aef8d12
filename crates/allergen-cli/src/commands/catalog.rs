use allergen_core::{ALLERGEN_CATEGORIES, CATALOG_VERSION};

pub fn run_catalog(format: &str) -> Result<String, String> {
    if format == "json" {
        let output = serde_json::json!({
            "version": CATALOG_VERSION,
            "categories": *ALLERGEN_CATEGORIES,
        });
        return serde_json::to_string_pretty(&output)
            .map_err(|e| format!("JSON serialization error: {e}"));
    }

    let mut lines: Vec<String> = Vec::new();
    let mut count = 0;
    for category in ALLERGEN_CATEGORIES.iter() {
        lines.push(category.category.to_string());
        for item in &category.items {
            lines.push(format!("  {:<14}{}", item.id, item.label));
            count += 1;
            for child in &item.children {
                lines.push(format!("    {:<12}{}", child.id, child.label));
                count += 1;
            }
        }
    }

    let category_count = ALLERGEN_CATEGORIES.len();
    lines.push(format!(
        "{count} allergens in {category_count} categories (catalog {CATALOG_VERSION})."
    ));
    Ok(lines.join("\n"))
}
