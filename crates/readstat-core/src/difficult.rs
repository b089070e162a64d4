//! Difficult-word selection.
//!
//! A word is difficult when it is not in the language's easy-word list and
//! has at least `syllable_threshold` syllables.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::dictionaries::easy_words::easy_words;
use crate::language::lang_root;
use crate::syllables::syllables_in_word;

/// Candidate words: word characters plus internal `=`, `'` and smart quotes.
static CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w='‘’]+").expect("valid regex"));

/// Whether `word` is easy: listed, or below the syllable threshold.
pub fn is_easy_word(word: &str, syllable_threshold: usize, lang: &str) -> bool {
    let word = word.to_lowercase();
    easy_words(lang_root(lang)).contains(&word) || syllables_in_word(&word, lang) < syllable_threshold
}

/// Whether `word` is difficult.
///
/// Input that is not exactly one whitespace-separated token is never
/// difficult. Callers passing phrases get `false` rather than an error.
///
/// ```
/// use readstat_core::difficult::is_difficult_word;
///
/// assert!(is_difficult_word("regardless", 2, "en"));
/// assert!(!is_difficult_word("dog", 0, "en"));
/// ```
pub fn is_difficult_word(word: &str, syllable_threshold: usize, lang: &str) -> bool {
    let mut tokens = word.split_whitespace();
    let (Some(word), None) = (tokens.next(), tokens.next()) else {
        return false;
    };
    !is_easy_word(word, syllable_threshold, lang)
}

/// Lowercased candidate words in first-seen order, without repeats.
fn candidates(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();
    CANDIDATE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| seen.insert(*word))
        .map(str::to_string)
        .collect()
}

/// List the distinct difficult words of `text`, in first-seen order.
///
/// Each word appears once however often it occurs, so the length of this
/// list is not a frequency.
#[tracing::instrument(skip_all, fields(text_len = text.len(), lang = %lang))]
pub fn list_difficult_words(text: &str, syllable_threshold: usize, lang: &str) -> Vec<String> {
    candidates(text)
        .into_iter()
        .filter(|word| is_difficult_word(word, syllable_threshold, lang))
        .collect()
}

/// The distinct difficult words of `text`, sorted.
pub fn set_difficult_words(text: &str, syllable_threshold: usize, lang: &str) -> BTreeSet<String> {
    list_difficult_words(text, syllable_threshold, lang)
        .into_iter()
        .collect()
}

/// Count distinct difficult words.
///
/// Candidates are split on any character outside `[\w='‘’]`, while
/// [`count_words`](crate::text::count_words) deletes punctuation and splits
/// on whitespace only. Text that joins words with punctuation and no space
/// (`"regardless,committee"`) is one word but two candidates, so this count
/// can exceed the word count. With punctuation only at word ends it never
/// does.
pub fn count_difficult_words(text: &str, lang: &str, syllable_threshold: usize) -> usize {
    list_difficult_words(text, syllable_threshold, lang).len()
}
