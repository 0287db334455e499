//! Human-friendly ordering for display names.
//!
//! Uses the Unicode Collation Algorithm with the CLDR root order: accents
//! and case only break ties between otherwise equal letters, so "Éclair"
//! sorts among the e's rather than after "Zed".

use std::cmp::Ordering;

use feruca::Collator;

/// Orders two names the way a reader expects rather than by code point.
///
/// Lower case sorts before upper case when names differ only in case.
/// Names with identical collation keys fall back to byte order, so the
/// order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

/// Sorts `items` by the name `key` returns, reusing one collator.
pub fn sort_by_name<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    let mut collator = Collator::default();
    items.sort_by(|a, b| collator.collate(key(a), key(b)));
}
