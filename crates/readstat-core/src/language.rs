//! Language tags and per-language formula constants.
//!
//! A language tag such as `"en_US"` resolves to its root (`"en"`) by
//! truncating at the first underscore. Constants are looked up on the root
//! and fall back to the `en` entry, key by key.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{StatError, StatResult};

/// Root used when a tag's own root has no entry.
pub const DEFAULT_ROOT: &str = "en";

/// The built-in table, shared by the free-function API.
static BUILTIN: LazyLock<LanguageTable> = LazyLock::new(LanguageTable::builtin);

/// Return the root of a language tag: everything before the first `_`.
///
/// ```
/// use readstat_core::language::lang_root;
///
/// assert_eq!(lang_root("en_US"), "en");
/// assert_eq!(lang_root("de"), "de");
/// ```
pub fn lang_root(tag: &str) -> &str {
    tag.split_once('_').map_or(tag, |(root, _)| root)
}

/// A key in the per-language configuration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Constant term of the Flesch Reading Ease family.
    FreBase,
    /// Weight of average sentence length in Flesch Reading Ease.
    FreSentenceLength,
    /// Weight of syllables per word in Flesch Reading Ease.
    FreSyllPerWord,
    /// Minimum syllables for a word to count as difficult in Gunning Fog.
    SyllableThreshold,
}

impl ConfigKey {
    /// All keys, in table order.
    pub const ALL: [Self; 4] = [
        Self::FreBase,
        Self::FreSentenceLength,
        Self::FreSyllPerWord,
        Self::SyllableThreshold,
    ];

    /// Returns the snake_case name used in config files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FreBase => "fre_base",
            Self::FreSentenceLength => "fre_sentence_length",
            Self::FreSyllPerWord => "fre_syll_per_word",
            Self::SyllableThreshold => "syllable_threshold",
        }
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StatError::UnknownConfigKey { key: s.to_string() })
    }
}

/// Formula constants for one language root.
///
/// Every field is optional: a missing value is taken from the `en` entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LangConfig {
    /// Constant term of Flesch Reading Ease.
    pub fre_base: Option<f64>,
    /// Weight of average sentence length.
    pub fre_sentence_length: Option<f64>,
    /// Weight of syllables per word.
    pub fre_syll_per_word: Option<f64>,
    /// Difficult-word syllable threshold.
    pub syllable_threshold: Option<f64>,
}

impl LangConfig {
    const fn new(base: f64, sentence_length: f64, syll_per_word: f64) -> Self {
        Self {
            fre_base: Some(base),
            fre_sentence_length: Some(sentence_length),
            fre_syll_per_word: Some(syll_per_word),
            syllable_threshold: None,
        }
    }

    const fn with_threshold(mut self, threshold: f64) -> Self {
        self.syllable_threshold = Some(threshold);
        self
    }

    /// Returns the value stored for `key`, if any.
    pub const fn get(&self, key: ConfigKey) -> Option<f64> {
        match key {
            ConfigKey::FreBase => self.fre_base,
            ConfigKey::FreSentenceLength => self.fre_sentence_length,
            ConfigKey::FreSyllPerWord => self.fre_syll_per_word,
            ConfigKey::SyllableThreshold => self.syllable_threshold,
        }
    }

    /// Overlay the values set in `other` onto `self`.
    pub fn merge(&mut self, other: &Self) {
        self.fre_base = other.fre_base.or(self.fre_base);
        self.fre_sentence_length = other.fre_sentence_length.or(self.fre_sentence_length);
        self.fre_syll_per_word = other.fre_syll_per_word.or(self.fre_syll_per_word);
        self.syllable_threshold = other.syllable_threshold.or(self.syllable_threshold);
    }
}

/// Mapping from language root to [`LangConfig`].
///
/// Built once and read-only afterwards. Use [`LanguageTable::with_overrides`]
/// to derive a table that carries user-supplied constants.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageTable {
    roots: HashMap<String, LangConfig>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LanguageTable {
    /// The table of published constants.
    pub fn builtin() -> Self {
        let roots = [
            ("en", LangConfig::new(206.835, 1.015, 84.6).with_threshold(3.0)),
            // Amstad
            ("de", LangConfig::new(180.0, 1.0, 58.5)),
            // Fernández Huerta
            ("es", LangConfig::new(206.84, 1.02, 60.0)),
            ("fr", LangConfig::new(207.0, 1.015, 73.6)),
            // Flesch-Vacca
            ("it", LangConfig::new(217.0, 1.3, 60.0)),
            // Flesch-Douma
            ("nl", LangConfig::new(206.835, 0.93, 77.0)),
            ("pl", LangConfig::default().with_threshold(4.0)),
            ("ru", LangConfig::new(206.835, 1.3, 60.1)),
            ("hu", LangConfig::new(206.835, 1.015, 58.5).with_threshold(5.0)),
        ]
        .into_iter()
        .map(|(root, cfg)| (root.to_string(), cfg))
        .collect();

        Self { roots }
    }

    /// Return a copy of this table with `overrides` merged in, root by root.
    ///
    /// Roots absent from the table are added as-is.
    pub fn with_overrides(&self, overrides: &HashMap<String, LangConfig>) -> Self {
        let mut roots = self.roots.clone();
        for (root, cfg) in overrides {
            roots.entry(root.clone()).or_default().merge(cfg);
        }
        Self { roots }
    }

    /// Whether the table has an entry for the root of `tag`.
    pub fn knows(&self, tag: &str) -> bool {
        self.roots.contains_key(lang_root(tag))
    }

    /// Resolve `key` for a language tag.
    ///
    /// Looks at the tag's root first, then at the `en` entry. An unmapped
    /// root resolves entirely against `en`.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::UnknownConfigKey`] when neither entry has a value.
    pub fn get(&self, tag: &str, key: ConfigKey) -> StatResult<f64> {
        let default = self.roots.get(DEFAULT_ROOT);
        let config = self.roots.get(lang_root(tag)).or(default);

        config
            .and_then(|cfg| cfg.get(key))
            .or_else(|| default.and_then(|cfg| cfg.get(key)))
            .ok_or_else(|| StatError::UnknownConfigKey {
                key: key.as_str().to_string(),
            })
    }

    /// Resolve a key given by name.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::UnknownConfigKey`] for an unknown name or a value
    /// missing from both the root and the `en` entry.
    pub fn get_named(&self, tag: &str, key: &str) -> StatResult<f64> {
        self.get(tag, key.parse()?)
    }
}

/// Resolve a configuration key against the built-in table.
///
/// # Errors
///
/// Returns [`StatError::UnknownConfigKey`] if the key does not exist.
pub fn get_lang_cfg(tag: &str, key: &str) -> StatResult<f64> {
    BUILTIN.get_named(tag, key)
}

/// Returns the built-in language table.
pub fn builtin_table() -> &'static LanguageTable {
    &BUILTIN
}
