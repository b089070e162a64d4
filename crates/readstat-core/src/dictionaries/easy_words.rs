//! Easy-word vocabularies.
//!
//! English uses the embedded Dale-Chall list, one lowercase word per line,
//! with `#` comment lines. The other roots of the built-in language table
//! use the most frequent words of the language from the Stopwords ISO lists
//! shipped by the `stop-words` crate. Any other root falls back to English.

use std::collections::{HashMap, HashSet};
use std::sync::{LazyLock, Mutex};

use crate::language::DEFAULT_ROOT;

const ENGLISH: &str = include_str!("../../resources/easy_words/en.txt");

/// Roots whose vocabulary comes from the `stop-words` crate.
const FREQUENT_WORD_ROOTS: &[&str] = &["de", "es", "fr", "hu", "it", "nl", "pl", "ru"];

static VOCABULARIES: LazyLock<HashMap<&'static str, HashSet<String>>> = LazyLock::new(|| {
    let frequent = FREQUENT_WORD_ROOTS
        .iter()
        .map(|&root| (root, from_words(stop_words::get(root).iter().copied())));
    std::iter::once((DEFAULT_ROOT, parse(ENGLISH)))
        .chain(frequent)
        .inspect(|(root, words)| tracing::debug!(root, words = words.len(), "loaded easy word list"))
        .collect()
});

/// Roots we already warned about.
static WARNED: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

fn parse(source: &str) -> HashSet<String> {
    from_words(
        source
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#')),
    )
}

/// Lowercased single-token entries. Phrases can never match a word.
fn from_words<'a>(words: impl Iterator<Item = &'a str>) -> HashSet<String> {
    words
        .filter(|word| !word.is_empty() && !word.contains(char::is_whitespace))
        .map(str::to_lowercase)
        .collect()
}

/// Returns the easy-word vocabulary for a language root.
///
/// A root with no list of its own gets the English vocabulary. The fallback
/// is logged once per root.
pub fn easy_words(root: &str) -> &'static HashSet<String> {
    if let Some(words) = VOCABULARIES.get(root) {
        return words;
    }

    warn_fallback(root);
    VOCABULARIES
        .get(DEFAULT_ROOT)
        .unwrap_or_else(empty_vocabulary)
}

fn empty_vocabulary() -> &'static HashSet<String> {
    static EMPTY: LazyLock<HashSet<String>> = LazyLock::new(HashSet::new);
    &EMPTY
}

fn warn_fallback(root: &str) {
    let Ok(mut warned) = WARNED.lock() else {
        return;
    };
    if warned.insert(root.to_string()) {
        tracing::warn!(root, fallback = DEFAULT_ROOT, "no easy word list for language, using fallback");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_list_loads() {
        let words = easy_words("en");
        assert!(words.len() > 2500);
        assert!(words.contains("dog"));
        assert!(words.contains("where"));
        assert!(words.contains("they're"));
        assert!(!words.contains("regardless"));
    }

    #[test]
    fn comment_lines_are_skipped() {
        let words = parse("# header\nCat\n\n  dog  \n");
        assert_eq!(words, HashSet::from(["cat".to_string(), "dog".to_string()]));
    }

    #[test]
    fn table_roots_have_their_own_lists() {
        for root in FREQUENT_WORD_ROOTS {
            let words = easy_words(root);
            assert!(!std::ptr::eq(words, easy_words("en")), "{root} fell back");
            assert!(words.len() > 300, "{root}: {}", words.len());
        }
        assert!(easy_words("de").contains("und"));
        assert!(easy_words("fr").contains("aujourd'hui"));
        assert!(easy_words("ru").contains("и"));
        assert!(!easy_words("de").contains("dog"));
    }

    #[test]
    fn phrases_are_dropped() {
        assert!(!easy_words("es").contains("por qué"));
        let words = from_words(["por qué", "que", ""].into_iter());
        assert_eq!(words, HashSet::from(["que".to_string()]));
    }

    #[test]
    fn unknown_root_falls_back_to_english() {
        assert!(std::ptr::eq(easy_words("xx"), easy_words("en")));
        // Second call takes the already-warned path.
        assert!(easy_words("xx").contains("dog"));
    }
}
