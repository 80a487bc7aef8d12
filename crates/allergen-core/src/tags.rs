use std::sync::LazyLock;

use regex::Regex;

/// Two-letter language code prefix, e.g. `en:` in `en:milk`.
static RE_LANG_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([a-z]{2}):").unwrap());

/// Lowercase a tag and strip its language prefix: `"EN:Milk"` -> `"milk"`.
///
/// Lowercasing happens first so upper-case prefixes are stripped too.
pub fn normalize_tag(tag: &str) -> String {
    let lower = tag.to_lowercase();
    match RE_LANG_PREFIX.find(&lower) {
        Some(m) => lower[m.end()..].to_string(),
        None => lower,
    }
}

/// The language code a tag is prefixed with, lowercased.
pub fn language_prefix(tag: &str) -> Option<String> {
    let lower = tag.to_lowercase();
    RE_LANG_PREFIX
        .captures(&lower)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Display form of a preference key: first letter upper-cased and
/// underscores replaced by spaces (`tree_nuts` -> `Tree nuts`).
pub fn display_name(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.as_str().replace('_', " ");
            first.to_uppercase().collect::<String>() + &rest
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_two_letter_prefix() {
        assert_eq!(normalize_tag("en:milk"), "milk");
        assert_eq!(normalize_tag("fr:lait"), "lait");
        assert_eq!(normalize_tag("EN:MILK"), "milk");
    }

    #[test]
    fn keeps_bare_and_long_prefixed_tags() {
        assert_eq!(normalize_tag("Milk"), "milk");
        assert_eq!(normalize_tag("eng:milk"), "eng:milk");
        assert_eq!(normalize_tag("e:milk"), "e:milk");
    }

    #[test]
    fn strips_only_the_leading_prefix() {
        assert_eq!(normalize_tag("en:de:milk"), "de:milk");
        assert_eq!(normalize_tag("en:"), "");
    }

    #[test]
    fn reports_language() {
        assert_eq!(language_prefix("FR:lait").as_deref(), Some("fr"));
        assert_eq!(language_prefix("lait"), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("tree_nuts"), "Tree nuts");
        assert_eq!(display_name("milk"), "Milk");
        assert_eq!(display_name("brazil_nuts"), "Brazil nuts");
        assert_eq!(display_name("msg"), "Msg");
        assert_eq!(display_name(""), "");
    }
}
