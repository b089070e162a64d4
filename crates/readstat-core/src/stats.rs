//! Memoized text statistics.
//!
//! [`Counts`] is the interface the formula layer reads from. [`Uncached`]
//! forwards straight to the free counting functions; [`TextStats`] puts a
//! bounded LRU cache in front of every one of them, keyed by the full
//! argument list including the language tag.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::arabic;
use crate::cache::{CacheStats, DEFAULT_CACHE_CAPACITY, Memo};
use crate::config::Config;
use crate::counts::{self, LONG_WORD_THRESHOLD, MINIWORD_MAX_SIZE, MS_PER_CHAR, ratio};
use crate::difficult;
use crate::error::{StatError, StatResult};
use crate::formulas::Formula;
use crate::language::{ConfigKey, LanguageTable, builtin_table};
use crate::syllables;
use crate::text;

/// The counting operations formulas are built from.
pub trait Counts {
    /// Characters, optionally ignoring whitespace.
    fn chars(&self, text: &str, ignore_spaces: bool) -> usize;
    /// Letters after punctuation removal.
    fn letters(&self, text: &str) -> usize;
    /// Words, optionally after punctuation removal.
    fn words(&self, text: &str, remove_punctuation: bool) -> usize;
    /// Syllables.
    fn syllables(&self, text: &str, lang: &str) -> usize;
    /// Sentences. Zero for blank text.
    fn sentences(&self, text: &str) -> usize;
    /// Distinct difficult words.
    fn difficult_words(&self, text: &str, lang: &str, syllable_threshold: usize) -> usize;
    /// Words longer than `threshold` characters.
    fn long_words(&self, text: &str, threshold: usize) -> usize;
    /// Words of at most `max_size` characters.
    fn miniwords(&self, text: &str, max_size: usize) -> usize;
    /// One-syllable words.
    fn monosyllable_words(&self, text: &str, lang: &str) -> usize;
    /// Words of three or more syllables.
    fn polysyllable_words(&self, text: &str, lang: &str) -> usize;
    /// Arabic syllables from tashkeel. May be negative.
    fn arabic_syllables(&self, text: &str) -> isize;
    /// Arabic words over five letters.
    fn arabic_long_words(&self, text: &str) -> usize;
    /// Heavily diacritized Arabic words.
    fn complex_arabic_words(&self, text: &str) -> usize;
    /// Faseeh words.
    fn faseeh(&self, text: &str) -> usize;

    /// Resolve a language constant.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::UnknownConfigKey`](crate::error::StatError::UnknownConfigKey) when no entry has the key.
    fn lang_cfg(&self, lang: &str, key: ConfigKey) -> StatResult<f64>;

    /// Words per sentence.
    fn avg_sentence_length(&self, text: &str) -> f64 {
        ratio(self.words(text, true) as f64, self.sentences(text) as f64)
    }

    /// Syllables per word.
    fn avg_syllables_per_word(&self, text: &str, lang: &str) -> f64 {
        ratio(self.syllables(text, lang) as f64, self.words(text, true) as f64)
    }

    /// Letters per word.
    fn avg_letter_per_word(&self, text: &str) -> f64 {
        ratio(self.letters(text) as f64, self.words(text, true) as f64)
    }

    /// Sentences per word.
    fn avg_sentence_per_word(&self, text: &str) -> f64 {
        ratio(self.sentences(text) as f64, self.words(text, true) as f64)
    }
}

/// Counting without a cache.
#[derive(Debug, Clone, Copy)]
pub struct Uncached<'a> {
    table: &'a LanguageTable,
}

impl<'a> Uncached<'a> {
    /// Count with constants from `table`.
    pub const fn new(table: &'a LanguageTable) -> Self {
        Self { table }
    }
}

impl Default for Uncached<'static> {
    fn default() -> Self {
        Self::new(builtin_table())
    }
}

impl Counts for Uncached<'_> {
    fn chars(&self, text: &str, ignore_spaces: bool) -> usize {
        counts::count_chars(text, ignore_spaces)
    }

    fn letters(&self, text: &str) -> usize {
        counts::count_letters(text)
    }

    fn words(&self, text: &str, remove_punctuation: bool) -> usize {
        text::count_words(text, remove_punctuation)
    }

    fn syllables(&self, text: &str, lang: &str) -> usize {
        syllables::count_syllables(text, lang)
    }

    fn sentences(&self, text: &str) -> usize {
        text::count_sentences(text)
    }

    fn difficult_words(&self, text: &str, lang: &str, syllable_threshold: usize) -> usize {
        difficult::count_difficult_words(text, lang, syllable_threshold)
    }

    fn long_words(&self, text: &str, threshold: usize) -> usize {
        counts::count_long_words(text, threshold)
    }

    fn miniwords(&self, text: &str, max_size: usize) -> usize {
        counts::count_miniwords(text, max_size)
    }

    fn monosyllable_words(&self, text: &str, lang: &str) -> usize {
        counts::count_monosyllable_words(text, lang)
    }

    fn polysyllable_words(&self, text: &str, lang: &str) -> usize {
        counts::count_polysyllable_words(text, lang)
    }

    fn arabic_syllables(&self, text: &str) -> isize {
        arabic::count_arabic_syllables(text)
    }

    fn arabic_long_words(&self, text: &str) -> usize {
        arabic::count_arabic_long_words(text)
    }

    fn complex_arabic_words(&self, text: &str) -> usize {
        arabic::count_complex_arabic_words(text)
    }

    fn faseeh(&self, text: &str) -> usize {
        arabic::count_faseeh(text)
    }

    fn lang_cfg(&self, lang: &str, key: ConfigKey) -> StatResult<f64> {
        self.table.get(lang, key)
    }
}

/// A memoized counting function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    /// [`counts::count_chars`].
    Chars,
    /// [`counts::count_letters`].
    Letters,
    /// [`text::count_words`].
    Words,
    /// [`syllables::count_syllables`].
    Syllables,
    /// [`text::count_sentences`].
    Sentences,
    /// [`difficult::count_difficult_words`].
    DifficultWords,
    /// [`counts::count_long_words`].
    LongWords,
    /// [`counts::count_miniwords`].
    Miniwords,
    /// [`counts::count_monosyllable_words`].
    MonosyllableWords,
    /// [`counts::count_polysyllable_words`].
    PolysyllableWords,
    /// [`arabic::count_arabic_syllables`].
    ArabicSyllables,
    /// [`arabic::count_arabic_long_words`].
    ArabicLongWords,
    /// [`arabic::count_complex_arabic_words`].
    ComplexArabicWords,
    /// [`arabic::count_faseeh`].
    Faseeh,
    /// [`Formula::compute`].
    Score,
}

impl Counter {
    /// Every counter.
    pub const ALL: [Self; 15] = [
        Self::Chars,
        Self::Letters,
        Self::Words,
        Self::Syllables,
        Self::Sentences,
        Self::DifficultWords,
        Self::LongWords,
        Self::Miniwords,
        Self::MonosyllableWords,
        Self::PolysyllableWords,
        Self::ArabicSyllables,
        Self::ArabicLongWords,
        Self::ComplexArabicWords,
        Self::Faseeh,
        Self::Score,
    ];

    /// Returns the snake_case name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chars => "chars",
            Self::Letters => "letters",
            Self::Words => "words",
            Self::Syllables => "syllables",
            Self::Sentences => "sentences",
            Self::DifficultWords => "difficult_words",
            Self::LongWords => "long_words",
            Self::Miniwords => "miniwords",
            Self::MonosyllableWords => "monosyllable_words",
            Self::PolysyllableWords => "polysyllable_words",
            Self::ArabicSyllables => "arabic_syllables",
            Self::ArabicLongWords => "arabic_long_words",
            Self::ComplexArabicWords => "complex_arabic_words",
            Self::Faseeh => "faseeh",
            Self::Score => "score",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Counter {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|counter| counter.as_str() == s)
            .ok_or_else(|| StatError::UnknownCounter {
                name: s.to_string(),
                available: Self::ALL.map(|counter| counter.as_str()).join(", "),
            })
    }
}

/// Counts for one text, as returned by [`TextStats::report`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextReport {
    /// Language tag the text was counted in.
    pub lang: String,
    /// Characters, whitespace excluded.
    pub chars: usize,
    /// Characters, whitespace included.
    pub chars_with_spaces: usize,
    /// Letters.
    pub letters: usize,
    /// Words after punctuation removal.
    pub words: usize,
    /// Sentences.
    pub sentences: usize,
    /// Syllables.
    pub syllables: usize,
    /// Distinct difficult words at the language's syllable threshold.
    pub difficult_words: usize,
    /// Words over six characters.
    pub long_words: usize,
    /// Words of three characters or fewer.
    pub miniwords: usize,
    /// One-syllable words.
    pub monosyllable_words: usize,
    /// Words of three or more syllables.
    pub polysyllable_words: usize,
    /// Words per sentence.
    pub avg_sentence_length: f64,
    /// Syllables per word.
    pub avg_syllables_per_word: f64,
    /// Estimated reading time in seconds.
    pub reading_time_secs: f64,
}

type TextKey = String;
type TextFlagKey = (String, bool);
type TextLangKey = (String, String);
type TextSizeKey = (String, usize);
type DifficultKey = (String, String, usize);
type ScoreKey = (Formula, String, String);

/// Memoized counters and formula scores.
///
/// Cheap to share across threads: every cache sits behind its own mutex.
#[derive(Debug)]
pub struct TextStats {
    table: LanguageTable,
    chars: Memo<TextFlagKey, usize>,
    letters: Memo<TextKey, usize>,
    words: Memo<TextFlagKey, usize>,
    syllables: Memo<TextLangKey, usize>,
    sentences: Memo<TextKey, usize>,
    difficult_words: Memo<DifficultKey, usize>,
    long_words: Memo<TextSizeKey, usize>,
    miniwords: Memo<TextSizeKey, usize>,
    monosyllable_words: Memo<TextLangKey, usize>,
    polysyllable_words: Memo<TextLangKey, usize>,
    arabic_syllables: Memo<TextKey, isize>,
    arabic_long_words: Memo<TextKey, usize>,
    complex_arabic_words: Memo<TextKey, usize>,
    faseeh: Memo<TextKey, usize>,
    scores: Memo<ScoreKey, f64>,
}

impl Default for TextStats {
    fn default() -> Self {
        Self::new(LanguageTable::builtin(), DEFAULT_CACHE_CAPACITY)
    }
}

impl TextStats {
    /// Create an engine over `table`, caching up to `capacity` entries per
    /// function.
    pub fn new(table: LanguageTable, capacity: usize) -> Self {
        Self {
            table,
            chars: Memo::new(Counter::Chars.as_str(), capacity),
            letters: Memo::new(Counter::Letters.as_str(), capacity),
            words: Memo::new(Counter::Words.as_str(), capacity),
            syllables: Memo::new(Counter::Syllables.as_str(), capacity),
            sentences: Memo::new(Counter::Sentences.as_str(), capacity),
            difficult_words: Memo::new(Counter::DifficultWords.as_str(), capacity),
            long_words: Memo::new(Counter::LongWords.as_str(), capacity),
            miniwords: Memo::new(Counter::Miniwords.as_str(), capacity),
            monosyllable_words: Memo::new(Counter::MonosyllableWords.as_str(), capacity),
            polysyllable_words: Memo::new(Counter::PolysyllableWords.as_str(), capacity),
            arabic_syllables: Memo::new(Counter::ArabicSyllables.as_str(), capacity),
            arabic_long_words: Memo::new(Counter::ArabicLongWords.as_str(), capacity),
            complex_arabic_words: Memo::new(Counter::ComplexArabicWords.as_str(), capacity),
            faseeh: Memo::new(Counter::Faseeh.as_str(), capacity),
            scores: Memo::new(Counter::Score.as_str(), capacity),
        }
    }

    /// Build an engine from loaded configuration: language overrides merged
    /// over the built-in table, cache capacity from `cache_capacity`.
    pub fn from_config(config: &Config) -> Self {
        let table = LanguageTable::builtin().with_overrides(&config.languages);
        Self::new(table, config.cache_capacity)
    }

    /// The language table this engine resolves constants against.
    pub const fn table(&self) -> &LanguageTable {
        &self.table
    }

    /// Score `text` with `formula`. Results are cached.
    ///
    /// # Errors
    ///
    /// Propagates [`StatError::InvalidVariant`](crate::error::StatError::InvalidVariant) and
    /// [`StatError::UnknownConfigKey`](crate::error::StatError::UnknownConfigKey) from the formula.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), formula = %formula, lang = %lang))]
    pub fn score(&self, formula: Formula, text: &str, lang: &str) -> StatResult<f64> {
        self.scores
            .get_or_try_insert_with((formula, text.to_string(), lang.to_string()), || {
                formula.compute(self, text, lang)
            })
    }

    /// Score `text` with every formula in `formulas`, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first formula that fails.
    pub fn scores(
        &self,
        formulas: &[Formula],
        text: &str,
        lang: &str,
    ) -> StatResult<Vec<(Formula, f64)>> {
        formulas
            .iter()
            .map(|&formula| Ok((formula, self.score(formula, text, lang)?)))
            .collect()
    }

    /// Count everything [`TextReport`] holds.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::UnknownConfigKey`](crate::error::StatError::UnknownConfigKey) if the syllable threshold for
    /// `lang` cannot be resolved.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), lang = %lang))]
    pub fn report(&self, text: &str, lang: &str) -> StatResult<TextReport> {
        let threshold = self.lang_cfg(lang, ConfigKey::SyllableThreshold)?;

        Ok(TextReport {
            lang: lang.to_string(),
            chars: self.chars(text, true),
            chars_with_spaces: self.chars(text, false),
            letters: self.letters(text),
            words: self.words(text, true),
            sentences: self.sentences(text),
            syllables: self.syllables(text, lang),
            difficult_words: self.difficult_words(text, lang, threshold.max(0.0) as usize),
            long_words: self.long_words(text, LONG_WORD_THRESHOLD),
            miniwords: self.miniwords(text, MINIWORD_MAX_SIZE),
            monosyllable_words: self.monosyllable_words(text, lang),
            polysyllable_words: self.polysyllable_words(text, lang),
            avg_sentence_length: self.avg_sentence_length(text),
            avg_syllables_per_word: self.avg_syllables_per_word(text, lang),
            reading_time_secs: counts::reading_time(text, MS_PER_CHAR),
        })
    }

    /// Clear one function's cache and reset its counters.
    pub fn clear_cache(&self, counter: Counter) {
        match counter {
            Counter::Chars => self.chars.clear(),
            Counter::Letters => self.letters.clear(),
            Counter::Words => self.words.clear(),
            Counter::Syllables => self.syllables.clear(),
            Counter::Sentences => self.sentences.clear(),
            Counter::DifficultWords => self.difficult_words.clear(),
            Counter::LongWords => self.long_words.clear(),
            Counter::Miniwords => self.miniwords.clear(),
            Counter::MonosyllableWords => self.monosyllable_words.clear(),
            Counter::PolysyllableWords => self.polysyllable_words.clear(),
            Counter::ArabicSyllables => self.arabic_syllables.clear(),
            Counter::ArabicLongWords => self.arabic_long_words.clear(),
            Counter::ComplexArabicWords => self.complex_arabic_words.clear(),
            Counter::Faseeh => self.faseeh.clear(),
            Counter::Score => self.scores.clear(),
        }
    }

    /// Clear every cache.
    pub fn clear_all_caches(&self) {
        for counter in Counter::ALL {
            self.clear_cache(counter);
        }
    }

    /// Hit and miss counters for one function.
    pub fn cache_stats(&self, counter: Counter) -> CacheStats {
        match counter {
            Counter::Chars => self.chars.stats(),
            Counter::Letters => self.letters.stats(),
            Counter::Words => self.words.stats(),
            Counter::Syllables => self.syllables.stats(),
            Counter::Sentences => self.sentences.stats(),
            Counter::DifficultWords => self.difficult_words.stats(),
            Counter::LongWords => self.long_words.stats(),
            Counter::Miniwords => self.miniwords.stats(),
            Counter::MonosyllableWords => self.monosyllable_words.stats(),
            Counter::PolysyllableWords => self.polysyllable_words.stats(),
            Counter::ArabicSyllables => self.arabic_syllables.stats(),
            Counter::ArabicLongWords => self.arabic_long_words.stats(),
            Counter::ComplexArabicWords => self.complex_arabic_words.stats(),
            Counter::Faseeh => self.faseeh.stats(),
            Counter::Score => self.scores.stats(),
        }
    }
}

fn text_lang(text: &str, lang: &str) -> TextLangKey {
    (text.to_string(), lang.to_string())
}

impl Counts for TextStats {
    fn chars(&self, text: &str, ignore_spaces: bool) -> usize {
        self.chars
            .get_or_insert_with((text.to_string(), ignore_spaces), || {
                counts::count_chars(text, ignore_spaces)
            })
    }

    fn letters(&self, text: &str) -> usize {
        self.letters
            .get_or_insert_with(text.to_string(), || counts::count_letters(text))
    }

    fn words(&self, text: &str, remove_punctuation: bool) -> usize {
        self.words
            .get_or_insert_with((text.to_string(), remove_punctuation), || {
                text::count_words(text, remove_punctuation)
            })
    }

    fn syllables(&self, text: &str, lang: &str) -> usize {
        self.syllables
            .get_or_insert_with(text_lang(text, lang), || syllables::count_syllables(text, lang))
    }

    fn sentences(&self, text: &str) -> usize {
        self.sentences
            .get_or_insert_with(text.to_string(), || text::count_sentences(text))
    }

    fn difficult_words(&self, text: &str, lang: &str, syllable_threshold: usize) -> usize {
        self.difficult_words.get_or_insert_with(
            (text.to_string(), lang.to_string(), syllable_threshold),
            || difficult::count_difficult_words(text, lang, syllable_threshold),
        )
    }

    fn long_words(&self, text: &str, threshold: usize) -> usize {
        self.long_words
            .get_or_insert_with((text.to_string(), threshold), || {
                counts::count_long_words(text, threshold)
            })
    }

    fn miniwords(&self, text: &str, max_size: usize) -> usize {
        self.miniwords
            .get_or_insert_with((text.to_string(), max_size), || {
                counts::count_miniwords(text, max_size)
            })
    }

    fn monosyllable_words(&self, text: &str, lang: &str) -> usize {
        self.monosyllable_words
            .get_or_insert_with(text_lang(text, lang), || {
                counts::count_monosyllable_words(text, lang)
            })
    }

    fn polysyllable_words(&self, text: &str, lang: &str) -> usize {
        self.polysyllable_words
            .get_or_insert_with(text_lang(text, lang), || {
                counts::count_polysyllable_words(text, lang)
            })
    }

    fn arabic_syllables(&self, text: &str) -> isize {
        self.arabic_syllables
            .get_or_insert_with(text.to_string(), || arabic::count_arabic_syllables(text))
    }

    fn arabic_long_words(&self, text: &str) -> usize {
        self.arabic_long_words
            .get_or_insert_with(text.to_string(), || arabic::count_arabic_long_words(text))
    }

    fn complex_arabic_words(&self, text: &str) -> usize {
        self.complex_arabic_words
            .get_or_insert_with(text.to_string(), || arabic::count_complex_arabic_words(text))
    }

    fn faseeh(&self, text: &str) -> usize {
        self.faseeh
            .get_or_insert_with(text.to_string(), || arabic::count_faseeh(text))
    }

    fn lang_cfg(&self, lang: &str, key: ConfigKey) -> StatResult<f64> {
        self.table.get(lang, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LangConfig;

    const TEXT: &str = "The cat sat on the mat. The dog ran off fast.";

    #[test]
    fn clear_then_miss_then_hit() {
        let stats = TextStats::default();
        stats.syllables(TEXT, "en");
        stats.clear_cache(Counter::Syllables);

        let first = stats.syllables(TEXT, "en");
        let second = stats.syllables(TEXT, "en");
        assert_eq!(first, second);

        let cache = stats.cache_stats(Counter::Syllables);
        assert_eq!((cache.misses, cache.hits), (1, 1));
    }

    #[test]
    fn language_is_part_of_the_key() {
        let stats = TextStats::default();
        stats.syllables(TEXT, "en_US");
        stats.syllables(TEXT, "en_GB");
        stats.syllables(TEXT, "en_US");

        let cache = stats.cache_stats(Counter::Syllables);
        assert_eq!(cache.len, 2);
        assert_eq!((cache.misses, cache.hits), (2, 1));
    }

    #[test]
    fn memoized_matches_uncached() {
        let stats = TextStats::default();
        let direct = Uncached::default();
        for formula in Formula::ALL {
            assert_eq!(
                stats.score(formula, TEXT, "en").unwrap().to_bits(),
                formula.compute(&direct, TEXT, "en").unwrap().to_bits(),
                "{formula}"
            );
        }
    }

    #[test]
    fn scores_are_cached_and_errors_are_not() {
        let stats = TextStats::default();
        stats.score(Formula::GunningFog, TEXT, "en").unwrap();
        stats.score(Formula::GunningFog, TEXT, "en").unwrap();
        assert_eq!(stats.cache_stats(Counter::Score).hits, 1);

        let err = stats
            .score(Formula::WienerSachtextformel(9), TEXT, "de")
            .unwrap_err();
        assert!(matches!(err, StatError::InvalidVariant { variant: 9, .. }));
        assert_eq!(stats.cache_stats(Counter::Score).len, 1);
    }

    #[test]
    fn clear_all_resets_everything() {
        let stats = TextStats::default();
        stats.report(TEXT, "en").unwrap();
        stats.clear_all_caches();
        for counter in Counter::ALL {
            assert_eq!(stats.cache_stats(counter), CacheStats { capacity: 128, ..CacheStats::default() });
        }
    }

    #[test]
    fn report_counts() {
        let report = TextStats::default().report(TEXT, "en_US").unwrap();
        assert_eq!(report.words, 11);
        assert_eq!(report.sentences, 2);
        assert_eq!(report.syllables, 11);
        assert_eq!(report.chars, 35);
        assert_eq!(report.chars_with_spaces, 45);
        assert_eq!(report.difficult_words, 0);
        assert_eq!(report.avg_sentence_length, 5.5);
    }

    #[test]
    fn overrides_flow_into_scores() {
        let overrides = std::collections::HashMap::from([(
            "en".to_string(),
            LangConfig {
                fre_base: Some(100.0),
                ..LangConfig::default()
            },
        )]);
        let table = LanguageTable::builtin().with_overrides(&overrides);
        let custom = TextStats::new(table, 8);
        let builtin = TextStats::default();

        let delta = builtin.score(Formula::FleschReadingEase, TEXT, "en").unwrap()
            - custom.score(Formula::FleschReadingEase, TEXT, "en").unwrap();
        assert!((delta - 106.835).abs() < 1e-9);
        assert_eq!(custom.cache_stats(Counter::Score).capacity, 8);
    }

    #[test]
    fn report_serializes_with_snake_case_fields() {
        let report = TextStats::default().report(TEXT, "en").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["lang"], "en");
        assert_eq!(json["words"], 11);
        assert_eq!(json["avg_sentence_length"], 5.5);
        assert!(json.get("reading_time_secs").is_some());
    }

    #[test]
    fn counter_names_round_trip() {
        for counter in Counter::ALL {
            assert_eq!(counter.to_string().parse::<Counter>().unwrap(), counter);
        }
        let err = "nope".parse::<Counter>().unwrap_err();
        assert!(matches!(&err, StatError::UnknownCounter { name, .. } if name == "nope"));
        assert!(err.to_string().contains("difficult_words"));
    }

    #[test]
    fn text_stats_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TextStats>();
    }
}
