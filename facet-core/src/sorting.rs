use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static LEADING_ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(the|a|an|der|die|das|le|la|les|el|los|las|il|lo|i|gli|un|une|een)\s+")
        .expect("leading article pattern is valid")
});

/// Compare two facet labels the way a reader expects an index to be ordered.
/// Falls back to the raw keys so the order is total.
pub fn compare_labels(a_label: &str, a_key: &str, b_label: &str, b_key: &str) -> Ordering {
    normalize_for_sorting(a_label)
        .cmp(&normalize_for_sorting(b_label))
        .then_with(|| a_key.cmp(b_key))
}

/// Normalize a label for sorting
/// - Strip leading articles (a, an, the, ...)
/// - Unicode NFD then lowercase
/// - Collapse whitespace
pub fn normalize_for_sorting(s: &str) -> String {
    let without_articles = strip_leading_articles(s);
    let normalized: String = without_articles.nfd().collect::<String>().to_lowercase();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip one leading article, English and common European ones
pub fn strip_leading_articles(s: &str) -> String {
    LEADING_ARTICLE.replace(s, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_leading_articles() {
        assert_eq!(strip_leading_articles("The Beatles"), "Beatles");
        assert_eq!(strip_leading_articles("an apple"), "apple");
        assert_eq!(strip_leading_articles("Theory"), "Theory");
    }

    #[test]
    fn test_normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize_for_sorting("  Security   Hotspot "), "security hotspot");
    }

    #[test]
    fn test_compare_labels_ignores_article_and_case() {
        assert_eq!(
            compare_labels("the zebra", "z", "Apple", "a"),
            Ordering::Greater
        );
        assert_eq!(compare_labels("same", "a", "Same", "b"), Ordering::Less);
    }
}
