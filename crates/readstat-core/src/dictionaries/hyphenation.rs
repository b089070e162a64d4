//! Knuth–Liang hyphenation patterns for syllable estimation.
//!
//! Pattern tables come embedded in the `hyphenation` crate. Each root's
//! table is deserialized on first use and kept for the life of the process.

use std::collections::HashMap;
use std::sync::{LazyLock, OnceLock};

use ::hyphenation::{Hyphenator, Language, Load, Standard};

/// Roots with a pattern table, and the table to use.
const ROOTS: &[(&str, Language)] = &[
    ("cs", Language::Czech),
    ("da", Language::Danish),
    ("de", Language::German1996),
    ("es", Language::Spanish),
    ("fi", Language::Finnish),
    ("fr", Language::French),
    ("hr", Language::Croatian),
    ("hu", Language::Hungarian),
    ("it", Language::Italian),
    ("nl", Language::Dutch),
    ("pl", Language::Polish),
    ("pt", Language::Portuguese),
    ("ru", Language::Russian),
    ("sv", Language::Swedish),
    ("tr", Language::Turkish),
    ("uk", Language::Ukrainian),
];

type Slot = OnceLock<Option<Standard>>;

static SLOTS: LazyLock<HashMap<&'static str, (Language, Slot)>> = LazyLock::new(|| {
    ROOTS
        .iter()
        .map(|&(root, language)| (root, (language, OnceLock::new())))
        .collect()
});

/// Returns the loaded dictionary for `root`, loading it on first use.
///
/// `None` when the root has no table or the table failed to load.
pub fn dictionary(root: &str) -> Option<&'static Standard> {
    let (language, slot) = SLOTS.get(root)?;
    slot.get_or_init(|| match Standard::from_embedded(*language) {
        Ok(dictionary) => {
            tracing::debug!(root, ?language, "loaded hyphenation patterns");
            Some(dictionary)
        }
        Err(err) => {
            tracing::warn!(root, error = %err, "failed to load hyphenation patterns");
            None
        }
    })
    .as_ref()
}

/// Count the syllables of `word` as hyphenation breaks plus one.
///
/// `None` when the root has no usable pattern table.
pub fn syllables(word: &str, root: &str) -> Option<usize> {
    let dictionary = dictionary(root)?;
    Some(dictionary.hyphenate(word).breaks.len() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_roots() {
        assert!(dictionary("de").is_some());
        assert!(dictionary("ru").is_some());
        assert!(dictionary("en").is_none());
        assert!(dictionary("xx").is_none());
    }

    #[test]
    fn unsupported_root_has_no_count() {
        assert_eq!(syllables("hello", "xx"), None);
    }

    #[test]
    fn german_compound_breaks() {
        let count = syllables("sonnenblume", "de").unwrap();
        assert!(count >= 3, "got {count}");
    }

    #[test]
    fn dictionary_is_loaded_once() {
        let first = dictionary("fr").unwrap();
        let second = dictionary("fr").unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
