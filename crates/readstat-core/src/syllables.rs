//! Syllable estimation.
//!
//! English words are looked up in the pronunciation dictionary. Other
//! languages use hyphenation patterns. Anything left over goes through a
//! vowel-group heuristic, with extra rules for English vowel hiatus.

use std::sync::LazyLock;

use regex::Regex;

use crate::dictionaries::{hyphenation, pronunciation};
use crate::language::{DEFAULT_ROOT, lang_root};
use crate::text::remove_punctuation;

/// Count the syllables in `text` for language `lang`.
///
/// The text is lowercased and stripped of punctuation (contraction
/// apostrophes kept), then each whitespace-separated word is counted on its
/// own.
///
/// ```
/// use readstat_core::syllables::count_syllables;
///
/// assert_eq!(count_syllables("Where the dog at?", "en_US"), 4);
/// assert_eq!(count_syllables("", "en_US"), 0);
/// ```
#[tracing::instrument(skip_all, fields(text_len = text.len(), lang = %lang))]
pub fn count_syllables(text: &str, lang: &str) -> usize {
    let cleaned = remove_punctuation(&text.to_lowercase(), false);
    cleaned
        .split_whitespace()
        .map(|word| syllables_in_word(word, lang))
        .sum()
}

/// Count the syllables in a single word.
pub fn syllables_in_word(word: &str, lang: &str) -> usize {
    if word.is_empty() {
        return 0;
    }

    let root = lang_root(lang);
    if root == DEFAULT_ROOT {
        return pronunciation::lookup_syllables(word).unwrap_or_else(|| estimate_english_syllables(word));
    }
    hyphenation::syllables(word, root).unwrap_or_else(|| estimate_syllables(word))
}

/// Vowel pairs that split into two syllables (ra-di-o, cre-ate, po-em).
static HIATUS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"io",
        r"[^gp]eo(?:[^u]|$)",
        r"[^h]oe[^s]",
        r"^scien|quie[tr]|^diet|clien",
        r"^c?rea(?:t[^hu]|t$|ct)",
        r"[^aeiou]ia",
        r"iu",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Spellings where a pair the hiatus rules count stays one syllable (na-tion, gra-cious).
static GLIDE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(?:[cgstx]|ll|ni)io", r"[cgst]ia", r"[cgst]iu"]
        .into_iter()
        .map(|pattern| Regex::new(pattern).expect("valid regex"))
        .collect()
});

/// Estimate English syllables: the vowel-group estimate corrected for hiatus.
///
/// Each matching rule counts once per word.
///
/// ```
/// use readstat_core::syllables::estimate_english_syllables;
///
/// assert_eq!(estimate_english_syllables("radio"), 3);
/// assert_eq!(estimate_english_syllables("nation"), 2);
/// ```
pub fn estimate_english_syllables(word: &str) -> usize {
    let base = estimate_syllables(word);
    if base == 0 {
        return 0;
    }
    let lowered = word.to_lowercase();
    let matching = |rules: &[Regex]| rules.iter().filter(|rule| rule.is_match(&lowered)).count();
    (base + matching(&HIATUS))
        .saturating_sub(matching(&GLIDE))
        .max(1)
}

/// Estimate syllables from vowel groups.
///
/// Each run of vowels is one syllable, adjusted for English silent `e`,
/// consonant + `le`, and the `-ed` / `-es` suffixes. Returns 0 for an empty
/// word and at least 1 otherwise.
pub fn estimate_syllables(word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }

    let chars: Vec<char> = word.to_lowercase().chars().filter(|c| *c != '\'').collect();
    let mut syllables: usize = 0;
    let mut previous_was_vowel = false;

    for &ch in &chars {
        let vowel = is_vowel(ch);
        if vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = vowel;
    }

    let n = chars.len();
    let at = |back: usize| n.checked_sub(back).and_then(|i| chars.get(i)).copied();
    let consonant = |back: usize| at(back).is_some_and(|c| c.is_alphabetic() && !is_vowel(c));

    if syllables > 1 && at(1) == Some('e') {
        // Consonant + "le" keeps its syllable (table, little).
        let syllabic_le = at(2) == Some('l') && consonant(3);
        if consonant(2) && !syllabic_le {
            syllables -= 1;
        }
    }

    if syllables > 1
        && at(1) == Some('d')
        && at(2) == Some('e')
        && consonant(3)
        && !matches!(at(3), Some('t' | 'd'))
    {
        syllables -= 1;
    }

    if syllables > 1
        && at(1) == Some('s')
        && at(2) == Some('e')
        && consonant(3)
        && !matches!(at(3), Some('s' | 'x' | 'z' | 'c' | 'g' | 'h'))
    {
        syllables -= 1;
    }

    syllables.max(1)
}

fn is_vowel(ch: char) -> bool {
    matches!(
        ch,
        'a' | 'e'
            | 'i'
            | 'o'
            | 'u'
            | 'y'
            | 'à'..='æ'
            | 'è'..='ï'
            | 'ò'..='ö'
            | 'ø'..='ü'
            | 'ő'
            | 'ű'
            | 'ą'
            | 'ę'
            | 'ě'
            | 'ů'
            | 'а'
            | 'е'
            | 'ё'
            | 'и'
            | 'о'
            | 'у'
            | 'ы'
            | 'э'
            | 'ю'
            | 'я'
            | 'і'
            | 'ї'
            | 'є'
    )
}
