//! URL slugs derived from human-entered names.

use std::sync::LazyLock;

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;

/// Length of the random suffix appended on a slug collision.
pub const UNIQUE_HASH_LENGTH: usize = 5;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("non-word pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Builds a slug from `name`.
///
/// The name is trimmed, every character other than ASCII letters, digits,
/// underscore and whitespace is dropped (hyphens included), each whitespace
/// run becomes a single `-` and the result is lower-cased.
///
/// ```
/// use storefront::utils::slug::generate_slug;
///
/// assert_eq!(generate_slug("  Running Shoes! "), "running-shoes");
/// assert_eq!(generate_slug("T-Shirts"), "tshirts");
/// ```
pub fn generate_slug(name: &str) -> String {
    let stripped = NON_WORD.replace_all(name.trim(), "");
    WHITESPACE_RUN.replace_all(&stripped, "-").to_lowercase()
}

/// Random `[A-Za-z0-9]` token used to disambiguate colliding slugs.
pub fn generate_unique_hash() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(UNIQUE_HASH_LENGTH)
        .map(char::from)
        .collect()
}

/// `generate_slug(name)` with a fresh random suffix.
pub fn generate_suffixed_slug(name: &str) -> String {
    format!("{}-{}", generate_slug(name), generate_unique_hash())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_simple_name() {
        assert_eq!(generate_slug("Shoes"), "shoes");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(generate_slug("  Summer \t Sale\n2024  "), "summer-sale-2024");
    }

    #[test]
    fn test_punctuation_and_hyphens_are_removed() {
        assert_eq!(generate_slug("Kid's T-Shirts & Tops!"), "kids-tshirts-tops");
        assert_eq!(generate_slug("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_non_ascii_letters_are_removed() {
        assert_eq!(generate_slug("Café Crème"), "caf-crme");
    }

    #[test]
    fn test_stripping_after_trim_can_leave_trailing_hyphen() {
        assert_eq!(generate_slug("Sale !"), "sale-");
    }

    #[test]
    fn test_empty_and_blank_names() {
        assert_eq!(generate_slug(""), "");
        assert_eq!(generate_slug("   "), "");
        assert_eq!(generate_slug("?!"), "");
    }

    #[test]
    fn test_unique_hash_shape() {
        for _ in 0..50 {
            let hash = generate_unique_hash();
            assert_eq!(hash.len(), UNIQUE_HASH_LENGTH);
            assert!(hash.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_suffixed_slug_shape() {
        let slug = generate_suffixed_slug("Shoes");
        let (base, hash) = slug.split_once('-').unwrap();
        assert_eq!(base, "shoes");
        assert_eq!(hash.len(), UNIQUE_HASH_LENGTH);
        assert!(hash.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    proptest! {
        #[test]
        fn prop_slug_is_lowercase_without_whitespace(name in "\\PC{0,40}") {
            let slug = generate_slug(&name);
            prop_assert!(!slug.chars().any(char::is_whitespace));
            prop_assert_eq!(slug.to_lowercase(), slug.clone());
            prop_assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        }

        #[test]
        fn prop_slug_is_idempotent_for_single_words(name in "[A-Za-z0-9_!?.,]{0,40}") {
            let slug = generate_slug(&name);
            prop_assert!(!slug.contains('-'));
            prop_assert_eq!(generate_slug(&slug), slug);
        }

        #[test]
        fn prop_slug_is_deterministic(name in "\\PC{0,40}") {
            prop_assert_eq!(generate_slug(&name), generate_slug(&name));
        }
    }
}
