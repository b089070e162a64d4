//! Aggregate counters built on the word lister, segmenter and syllable
//! estimator.
//!
//! Ratios go through [`ratio`], which turns a zero denominator into `0.0`.

use std::sync::LazyLock;

use regex::Regex;

use crate::syllables::{count_syllables, syllables_in_word};
use crate::text::{
    WordOptions, count_sentences, count_sentences_nonzero, count_words, list_words,
    remove_punctuation,
};

/// Default `threshold` for [`count_long_words`].
pub const LONG_WORD_THRESHOLD: usize = 6;

/// Default `max_size` for [`count_miniwords`].
pub const MINIWORD_MAX_SIZE: usize = 3;

/// Default reading speed for [`reading_time`], in milliseconds per character.
pub const MS_PER_CHAR: f64 = 14.69;

static LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}").expect("valid regex"));

/// Divide, or return `0.0` when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Count characters, optionally ignoring whitespace.
///
/// ```
/// use readstat_core::counts::count_chars;
///
/// assert_eq!(count_chars("a b", true), 2);
/// assert_eq!(count_chars("a b", false), 3);
/// ```
pub fn count_chars(text: &str, ignore_spaces: bool) -> usize {
    if ignore_spaces {
        text.chars().filter(|c| !c.is_whitespace()).count()
    } else {
        text.chars().count()
    }
}

/// Count letters: characters of a letter category once punctuation is gone.
pub fn count_letters(text: &str) -> usize {
    LETTER.find_iter(&remove_punctuation(text, true)).count()
}

/// Count the words for which `predicate` holds.
///
/// Words are listed with the default policy, so punctuation is removed and
/// case is preserved.
pub fn count_words_where<F>(text: &str, predicate: F) -> usize
where
    F: Fn(&str) -> bool,
{
    list_words(text, &WordOptions::default())
        .iter()
        .filter(|word| predicate(word.as_str()))
        .count()
}

/// Count words longer than `threshold` characters.
pub fn count_long_words(text: &str, threshold: usize) -> usize {
    count_words_where(text, |word| word.chars().count() > threshold)
}

/// Count words of at most `max_size` characters.
pub fn count_miniwords(text: &str, max_size: usize) -> usize {
    count_words_where(text, |word| word.chars().count() <= max_size)
}

/// Count words of exactly one syllable.
pub fn count_monosyllable_words(text: &str, lang: &str) -> usize {
    count_by_syllables(text, lang, |n| n == 1)
}

/// Count words of three or more syllables.
pub fn count_polysyllable_words(text: &str, lang: &str) -> usize {
    count_by_syllables(text, lang, |n| n >= 3)
}

fn count_by_syllables(text: &str, lang: &str, keep: impl Fn(usize) -> bool) -> usize {
    list_words(text, &WordOptions::lowercase())
        .iter()
        .filter(|word| keep(syllables_in_word(word.as_str(), lang)))
        .count()
}

/// Estimated reading time in seconds.
///
/// Every non-space character of every word costs `ms_per_char`.
pub fn reading_time(text: &str, ms_per_char: f64) -> f64 {
    let chars: usize = text.split_whitespace().map(|word| word.chars().count()).sum();
    chars as f64 * ms_per_char / 1000.0
}

/// Average words per sentence. `0.0` for text without sentences.
pub fn avg_sentence_length(text: &str) -> f64 {
    ratio(count_words(text, true) as f64, count_sentences(text) as f64)
}

/// Average syllables per word.
pub fn avg_syllables_per_word(text: &str, lang: &str) -> f64 {
    ratio(count_syllables(text, lang) as f64, count_words(text, true) as f64)
}

/// Average non-space characters per word.
pub fn avg_character_per_word(text: &str) -> f64 {
    ratio(count_chars(text, true) as f64, count_words(text, true) as f64)
}

/// Average letters per word.
pub fn avg_letter_per_word(text: &str) -> f64 {
    ratio(count_letters(text) as f64, count_words(text, true) as f64)
}

/// Average sentences per word.
pub fn avg_sentence_per_word(text: &str) -> f64 {
    ratio(count_sentences(text) as f64, count_words(text, true) as f64)
}

/// Words per sentence, counting blank text as one sentence.
pub fn words_per_sentence(text: &str) -> f64 {
    count_words(text, true) as f64 / count_sentences_nonzero(text) as f64
}
