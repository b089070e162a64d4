//! Text processing utilities.
//!
//! Punctuation removal, word listing, and sentence segmentation. Every
//! counter in the crate builds on these three primitives.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Characters that are neither word characters nor whitespace.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Same as [`PUNCTUATION`] but sparing the apostrophe.
static PUNCTUATION_KEEP_APOSTROPHE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s']").expect("valid regex"));

/// An apostrophe that starts a contraction suffix (they're, don't, we'll).
static CONTRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'(?:[tsd]|ve|ll|re)\b").expect("valid regex"));

/// Two or more single-letter-plus-dot groups (U.S.A., e.g.).
static ACRONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\b\p{L}\.){2,}").expect("valid regex"));

/// A run of non-terminators followed by any terminators.
static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[^.!?]+[.!?]*").expect("valid regex"));

/// Spans with this many words or fewer are not counted as sentences.
pub const FRAGMENT_MAX_WORDS: usize = 2;

/// Remove punctuation from text.
///
/// With `remove_apostrophes`, everything that is not a word character or
/// whitespace goes. Otherwise apostrophes survive when they introduce a
/// contraction suffix (`'s`, `'t`, `'d`, `'ve`, `'ll`, `'re`); quoting
/// apostrophes are dropped along with the rest. Hyphens are always removed.
///
/// ```
/// use readstat_core::text::remove_punctuation;
///
/// assert_eq!(remove_punctuation("They're here", true), "Theyre here");
/// assert_eq!(remove_punctuation("They're here", false), "They're here");
/// ```
pub fn remove_punctuation(text: &str, remove_apostrophes: bool) -> String {
    if remove_apostrophes {
        return PUNCTUATION.replace_all(text, "").into_owned();
    }

    let mut out = PUNCTUATION_KEEP_APOSTROPHE.replace_all(text, "").into_owned();
    // Dropping one apostrophe can expose its neighbour (`'s'x`), so repeat
    // until every remaining apostrophe heads a contraction.
    while let Some(stripped) = drop_quoting_apostrophes(&out) {
        out = stripped;
    }
    out
}

/// Remove apostrophes that do not start a contraction suffix.
///
/// Returns `None` when there is nothing to remove.
fn drop_quoting_apostrophes(text: &str) -> Option<String> {
    if !text.contains('\'') {
        return None;
    }

    let keep: HashSet<usize> = CONTRACTION.find_iter(text).map(|m| m.start()).collect();
    let mut changed = false;
    let out: String = text
        .char_indices()
        .filter(|&(idx, ch)| {
            let drop = ch == '\'' && !keep.contains(&idx);
            changed |= drop;
            !drop
        })
        .map(|(_, ch)| ch)
        .collect();

    changed.then_some(out)
}

/// Word listing policy.
///
/// The defaults match plain word counting: punctuation removed, apostrophes
/// and case preserved, nothing split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordOptions {
    /// Apply [`remove_punctuation`] before splitting.
    pub remove_punctuation: bool,
    /// Passed through to [`remove_punctuation`].
    pub remove_apostrophes: bool,
    /// Lowercase every word.
    pub lowercase: bool,
    /// Turn remaining apostrophes into word breaks.
    pub split_contractions: bool,
    /// Turn hyphens into word breaks.
    pub split_hyphens: bool,
}

impl Default for WordOptions {
    fn default() -> Self {
        Self {
            remove_punctuation: true,
            remove_apostrophes: false,
            lowercase: false,
            split_contractions: false,
            split_hyphens: false,
        }
    }
}

impl WordOptions {
    /// Words with punctuation kept as-is.
    pub fn raw() -> Self {
        Self {
            remove_punctuation: false,
            ..Self::default()
        }
    }

    /// Lowercased, punctuation-free words.
    pub fn lowercase() -> Self {
        Self {
            lowercase: true,
            ..Self::default()
        }
    }
}

/// Split text into words under the given policy.
///
/// Steps run in a fixed order: hyphen split, punctuation removal,
/// contraction split, lowercasing, whitespace split. Splitting contractions
/// after apostrophes were removed therefore has no effect.
pub fn list_words(text: &str, options: &WordOptions) -> Vec<String> {
    let mut text = if options.split_hyphens {
        text.replace('-', " ")
    } else {
        text.to_string()
    };

    if options.remove_punctuation {
        text = remove_punctuation(&text, options.remove_apostrophes);
    }

    if options.split_contractions {
        text = text.replace('\'', " ");
    }

    if options.lowercase {
        text = text.to_lowercase();
    }

    text.split_whitespace().map(str::to_string).collect()
}

/// Count words, optionally removing punctuation first.
///
/// Contractions and hyphenated compounds count as one word.
pub fn count_words(text: &str, remove_punctuation: bool) -> usize {
    let options = WordOptions {
        remove_punctuation,
        ..WordOptions::default()
    };
    list_words(text, &options).len()
}

/// Remove the dots inside acronyms so they do not end sentences.
pub fn collapse_acronyms(text: &str) -> String {
    ACRONYM
        .replace_all(text, |caps: &regex::Captures<'_>| caps[0].replace('.', ""))
        .into_owned()
}

/// Split text into sentence spans.
///
/// Every span is returned, including short fragments that
/// [`count_sentences`] would not count.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn list_sentences(text: &str) -> Vec<String> {
    let text = collapse_acronyms(text);
    SENTENCE
        .find_iter(&text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Count sentences, ignoring fragments of up to `max_fragment_words` words.
///
/// Blank text has no sentences. Any other text has at least one.
pub fn count_sentences_with(text: &str, max_fragment_words: usize) -> usize {
    if text.trim().is_empty() {
        return 0;
    }

    let spans = list_sentences(text);
    let fragments = spans
        .iter()
        .filter(|span| count_words(span, true) <= max_fragment_words)
        .count();

    (spans.len() - fragments).max(1)
}

/// Count sentences. Returns 0 for blank text and at least 1 otherwise.
pub fn count_sentences(text: &str) -> usize {
    count_sentences_with(text, FRAGMENT_MAX_WORDS)
}

/// Count sentences for use as a divisor. Never returns 0.
///
/// Identical to [`count_sentences`] except that blank text counts as one
/// sentence.
pub fn count_sentences_nonzero(text: &str) -> usize {
    count_sentences(text).max(1)
}
