//! Pure tier classification for extracted records

use crate::record::{Category, Tier};

/// Map (category, content) to a storage tier.
///
/// Policy, in priority order: error/secret/finance records are hot, anything
/// marked urgent or critical is hot, reference links (url/github) are cold,
/// everything else lands in warm. Deterministic and side-effect free; this is
/// the only place a tier is ever decided.
pub fn classify(category: Category, content: &str) -> Tier {
    if matches!(
        category,
        Category::Error | Category::Secret | Category::Finance
    ) {
        return Tier::Hot;
    }

    let lower = content.to_lowercase();
    if lower.contains("urgent") || lower.contains("critical") {
        return Tier::Hot;
    }

    if matches!(category, Category::Url | Category::Github) {
        return Tier::Cold;
    }

    Tier::Warm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hot_categories() {
        assert_eq!(classify(Category::Error, "boom"), Tier::Hot);
        assert_eq!(classify(Category::Secret, "anything"), Tier::Hot);
        assert_eq!(classify(Category::Finance, "$5"), Tier::Hot);
    }

    #[test]
    fn test_urgency_keywords_override_category() {
        assert_eq!(classify(Category::Task, "URGENT: ship it"), Tier::Hot);
        assert_eq!(classify(Category::Url, "critical link"), Tier::Hot);
        assert_eq!(classify(Category::Email, "a Critical update"), Tier::Hot);
    }

    #[test]
    fn test_reference_categories_are_cold() {
        assert_eq!(classify(Category::Url, "https://example.com"), Tier::Cold);
        assert_eq!(
            classify(Category::Github, "https://github.com/a/b"),
            Tier::Cold
        );
    }

    #[test]
    fn test_default_is_warm() {
        assert_eq!(classify(Category::Task, "review notes"), Tier::Warm);
        assert_eq!(classify(Category::Email, "jane@example.com"), Tier::Warm);
        assert_eq!(classify(Category::General, "hello"), Tier::Warm);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(classify(Category::Contact, "+1 555 000 1111"), Tier::Warm);
        }
    }
}
