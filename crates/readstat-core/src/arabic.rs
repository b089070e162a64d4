//! Arabic syllable and complexity counters.
//!
//! These work on tashkeel, the diacritic marks that carry short vowels,
//! nunation and gemination. Undiacritized text falls back to a length-based
//! estimate.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::remove_punctuation;

const FATHA: char = '\u{064E}';
const DAMMA: char = '\u{064F}';
const KASRA: char = '\u{0650}';

const ALEF: char = '\u{0627}';
const WAW: char = '\u{0648}';
const YAA: char = '\u{064A}';

/// Tanween (fath, damm, kasr) and shadda.
static STRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{064B}\x{064C}\x{064D}\x{0651}]").expect("valid regex"));

/// Characters dropped before the length fallback: alef, alef maqsura,
/// sentence punctuation, whitespace and `*`.
static FALLBACK_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{0627}\x{0649}?.!,\s*]").expect("valid regex"));

/// Every tashkeel mark, including sukun, madda and the small vowel signs.
static TASHKEEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{064E}\x{064B}\x{064F}\x{064C}\x{0650}\x{064D}\x{0651}\x{0652}\x{0653}\x{0657}\x{0658}]")
        .expect("valid regex")
});

/// Vowel, tanween and shadda marks counted by [`count_complex_arabic_words`].
static COMPLEX_MARK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{064E}\x{064B}\x{064F}\x{064C}\x{0650}\x{064D}\x{0651}]").expect("valid regex")
});

/// Hamza forms, thal and zah.
static FASEEH_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{0626}\x{0621}\x{0624}\x{0630}\x{0638}]").expect("valid regex")
});

/// Waw followed by alef or noon.
static FASEEH_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{0648}[\x{0627}\x{0646}]").expect("valid regex"));

/// Minimum-exclusive length for a long word, in characters.
pub const LONG_WORD_CHARS: usize = 5;

/// Minimum-exclusive mark count for a complex word.
pub const COMPLEX_WORD_MARKS: usize = 5;

/// Minimum-exclusive syllable count for a faseeh word.
pub const FASEEH_SYLLABLES: isize = 5;

/// Count Arabic syllables from tashkeel.
///
/// A fatha, damma or kasra is a short syllable, or a long one when the next
/// letter is alef, waw or yaa. Tanween and shadda count as stressed. The
/// result is `short + 2 * (long + stressed)`.
///
/// When the text has no short syllables at all, `short` becomes the length
/// of the raw input without alef, alef maqsura, whitespace, `*` and `?.!,`,
/// minus two. Other punctuation still counts toward that length. The
/// estimate is negative for one-letter input and is returned as-is.
#[tracing::instrument(skip_all, fields(text_len = raw.len()))]
pub fn count_arabic_syllables(raw: &str) -> isize {
    let text = remove_punctuation(raw, false);
    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();

    let mut short: isize = 0;
    let mut long: isize = 0;
    for (i, &ch) in chars.iter().enumerate() {
        if !matches!(ch, FATHA | DAMMA | KASRA) {
            continue;
        }
        match chars.get(i + 1).copied() {
            Some(ALEF | WAW | YAA) => long += 1,
            _ => short += 1,
        }
    }

    let stressed = isize::try_from(STRESS.find_iter(&text).count()).unwrap_or(isize::MAX);

    if short == 0 {
        let stripped = FALLBACK_STRIP.replace_all(raw, "");
        short = isize::try_from(stripped.chars().count()).unwrap_or(isize::MAX) - 2;
    }

    short + 2 * (long + stressed)
}

/// Count words longer than five letters once tashkeel is removed.
pub fn count_arabic_long_words(text: &str) -> usize {
    let bare = TASHKEEL.replace_all(text, "");
    remove_punctuation(&bare, false)
        .split_whitespace()
        .filter(|word| word.chars().count() > LONG_WORD_CHARS)
        .count()
}

/// Count words carrying more than five vowel, tanween or shadda marks.
pub fn count_complex_arabic_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|word| COMPLEX_MARK.find_iter(word).count() > COMPLEX_WORD_MARKS)
        .count()
}

/// Count faseeh words.
///
/// A faseeh word has more than five syllables and contains a hamza form,
/// thal, zah, or waw followed by alef or noon.
pub fn count_faseeh(text: &str) -> usize {
    text.split_whitespace()
        .filter(|word| FASEEH_LETTER.is_match(word) || FASEEH_PAIR.is_match(word))
        .filter(|word| count_arabic_syllables(word) > FASEEH_SYLLABLES)
        .count()
}
