//! Readability formulas.
//!
//! Each formula is a function over a [`Counts`] source, so the same code
//! runs against the memoized [`TextStats`](crate::TextStats) or straight
//! against the free counting functions. Input with a zero denominator scores
//! `0.0`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::counts::{LONG_WORD_THRESHOLD, MINIWORD_MAX_SIZE, ratio};
use crate::error::{StatError, StatResult};
use crate::language::ConfigKey;
use crate::stats::Counts;
use crate::syllables::count_syllables;
use crate::text::count_sentences_nonzero;

/// Words considered by Linsear Write.
pub const LINSEAR_WINDOW: usize = 100;

/// A readability formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    /// Flesch Reading Ease, with per-language constants.
    FleschReadingEase,
    /// Flesch-Kincaid Grade Level.
    FleschKincaidGrade,
    /// SMOG index. Needs three sentences.
    SmogIndex,
    /// Coleman-Liau index.
    ColemanLiauIndex,
    /// Automated Readability Index.
    AutomatedReadabilityIndex,
    /// Linsear Write over the first hundred words.
    LinsearWriteFormula,
    /// New Dale-Chall score.
    DaleChallReadabilityScore,
    /// Gunning Fog index.
    GunningFog,
    /// Läsbarhetsindex.
    Lix,
    /// Anderson's Rix.
    Rix,
    /// Spache readability.
    SpacheReadability,
    /// McAlpine EFLAW, for English learners.
    McalpineEflaw,
    /// Fernández Huerta (Spanish).
    FernandezHuerta,
    /// Szigriszt-Pazos perspicuity (Spanish).
    SzigrisztPazos,
    /// Gutiérrez de Polini comprehensibility (Spanish).
    GutierrezPolini,
    /// Crawford years of schooling (Spanish).
    Crawford,
    /// Gulpease index (Italian).
    GulpeaseIndex,
    /// Osman (Arabic).
    Osman,
    /// Wiener Sachtextformel (German), variant 1 to 4.
    WienerSachtextformel(u8),
}

impl Formula {
    /// Every formula, with Wiener Sachtextformel as variant 1.
    pub const ALL: [Self; 19] = [
        Self::FleschReadingEase,
        Self::FleschKincaidGrade,
        Self::SmogIndex,
        Self::ColemanLiauIndex,
        Self::AutomatedReadabilityIndex,
        Self::LinsearWriteFormula,
        Self::DaleChallReadabilityScore,
        Self::GunningFog,
        Self::Lix,
        Self::Rix,
        Self::SpacheReadability,
        Self::McalpineEflaw,
        Self::FernandezHuerta,
        Self::SzigrisztPazos,
        Self::GutierrezPolini,
        Self::Crawford,
        Self::GulpeaseIndex,
        Self::Osman,
        Self::WienerSachtextformel(1),
    ];

    /// Returns the snake_case name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FleschReadingEase => "flesch_reading_ease",
            Self::FleschKincaidGrade => "flesch_kincaid_grade",
            Self::SmogIndex => "smog_index",
            Self::ColemanLiauIndex => "coleman_liau_index",
            Self::AutomatedReadabilityIndex => "automated_readability_index",
            Self::LinsearWriteFormula => "linsear_write_formula",
            Self::DaleChallReadabilityScore => "dale_chall_readability_score",
            Self::GunningFog => "gunning_fog",
            Self::Lix => "lix",
            Self::Rix => "rix",
            Self::SpacheReadability => "spache_readability",
            Self::McalpineEflaw => "mcalpine_eflaw",
            Self::FernandezHuerta => "fernandez_huerta",
            Self::SzigrisztPazos => "szigriszt_pazos",
            Self::GutierrezPolini => "gutierrez_polini",
            Self::Crawford => "crawford",
            Self::GulpeaseIndex => "gulpease_index",
            Self::Osman => "osman",
            Self::WienerSachtextformel(_) => "wiener_sachtextformel",
        }
    }

    fn available() -> String {
        Self::ALL
            .iter()
            .map(Self::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Score `text` in language `lang`.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidVariant`] for a Wiener Sachtextformel
    /// variant outside 1-4 and [`StatError::UnknownConfigKey`] when a
    /// language constant cannot be resolved.
    pub fn compute<C: Counts + ?Sized>(self, counts: &C, text: &str, lang: &str) -> StatResult<f64> {
        match self {
            Self::FleschReadingEase => flesch_reading_ease(counts, text, lang),
            Self::FleschKincaidGrade => Ok(flesch_kincaid_grade(counts, text, lang)),
            Self::SmogIndex => Ok(smog_index(counts, text, lang)),
            Self::ColemanLiauIndex => Ok(coleman_liau_index(counts, text)),
            Self::AutomatedReadabilityIndex => Ok(automated_readability_index(counts, text)),
            Self::LinsearWriteFormula => Ok(linsear_write_formula(text, lang)),
            Self::DaleChallReadabilityScore => Ok(dale_chall_readability_score(counts, text, lang)),
            Self::GunningFog => gunning_fog(counts, text, lang),
            Self::Lix => Ok(lix(counts, text)),
            Self::Rix => Ok(rix(counts, text)),
            Self::SpacheReadability => Ok(spache_readability(counts, text, lang)),
            Self::McalpineEflaw => Ok(mcalpine_eflaw(counts, text)),
            Self::FernandezHuerta => Ok(fernandez_huerta(counts, text, lang)),
            Self::SzigrisztPazos => Ok(szigriszt_pazos(counts, text, lang)),
            Self::GutierrezPolini => Ok(gutierrez_polini(counts, text)),
            Self::Crawford => Ok(crawford(counts, text, lang)),
            Self::GulpeaseIndex => Ok(gulpease_index(counts, text)),
            Self::Osman => Ok(osman(counts, text)),
            Self::WienerSachtextformel(variant) => wiener_sachtextformel(counts, text, lang, variant),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WienerSachtextformel(variant) => write!(f, "{}:{variant}", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

impl FromStr for Formula {
    type Err = StatError;

    /// Parse a formula name. Wiener Sachtextformel takes an optional
    /// `:<variant>` suffix and defaults to variant 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || StatError::UnknownFormula {
            name: s.to_string(),
            available: Self::available(),
        };

        let normalized = s.trim().to_lowercase().replace('-', "_");
        if let Some(rest) = normalized.strip_prefix("wiener_sachtextformel") {
            let variant = match rest.strip_prefix(':') {
                None if rest.is_empty() => 1,
                Some(digits) => digits.parse().map_err(|_| unknown())?,
                None => return Err(unknown()),
            };
            return Ok(Self::WienerSachtextformel(variant));
        }

        Self::ALL
            .into_iter()
            .find(|formula| formula.name() == normalized)
            .ok_or_else(unknown)
    }
}

fn word_count<C: Counts + ?Sized>(counts: &C, text: &str) -> f64 {
    counts.words(text, true) as f64
}

/// Flesch Reading Ease.
///
/// `base - sentence_length * ASL - syll_per_word * ASW`, with the three
/// constants taken from the language table.
///
/// # Errors
///
/// Returns [`StatError::UnknownConfigKey`] when a constant is missing.
pub fn flesch_reading_ease<C: Counts + ?Sized>(counts: &C, text: &str, lang: &str) -> StatResult<f64> {
    let base = counts.lang_cfg(lang, ConfigKey::FreBase)?;
    let sentence_weight = counts.lang_cfg(lang, ConfigKey::FreSentenceLength)?;
    let syllable_weight = counts.lang_cfg(lang, ConfigKey::FreSyllPerWord)?;
    if counts.words(text, true) == 0 {
        return Ok(0.0);
    }

    Ok(sentence_weight.mul_add(
        -counts.avg_sentence_length(text),
        syllable_weight.mul_add(-counts.avg_syllables_per_word(text, lang), base),
    ))
}

/// Flesch-Kincaid Grade Level.
pub fn flesch_kincaid_grade<C: Counts + ?Sized>(counts: &C, text: &str, lang: &str) -> f64 {
    if counts.words(text, true) == 0 {
        return 0.0;
    }
    0.39f64.mul_add(
        counts.avg_sentence_length(text),
        11.8 * counts.avg_syllables_per_word(text, lang),
    ) - 15.59
}

/// SMOG index. Text with fewer than three sentences scores `0.0`.
pub fn smog_index<C: Counts + ?Sized>(counts: &C, text: &str, lang: &str) -> f64 {
    let sentences = counts.sentences(text);
    if sentences < 3 {
        return 0.0;
    }
    let polysyllables = counts.polysyllable_words(text, lang) as f64;
    1.043f64.mul_add((30.0 * polysyllables / sentences as f64).sqrt(), 3.1291)
}

/// Coleman-Liau index, from letters and sentences per hundred words.
pub fn coleman_liau_index<C: Counts + ?Sized>(counts: &C, text: &str) -> f64 {
    if counts.words(text, true) == 0 {
        return 0.0;
    }
    let letters = counts.avg_letter_per_word(text) * 100.0;
    let sentences = counts.avg_sentence_per_word(text) * 100.0;
    0.058f64.mul_add(letters, -0.296 * sentences) - 15.8
}

/// Automated Readability Index.
pub fn automated_readability_index<C: Counts + ?Sized>(counts: &C, text: &str) -> f64 {
    let words = word_count(counts, text);
    let sentences = counts.sentences(text) as f64;
    if words == 0.0 || sentences == 0.0 {
        return 0.0;
    }
    let chars_per_word = counts.chars(text, true) as f64 / words;
    4.71f64.mul_add(chars_per_word, 0.5 * (words / sentences)) - 21.43
}

/// Linsear Write.
///
/// Looks at the first hundred whitespace tokens. Tokens under three
/// syllables score one point, the rest three. The tokens are rejoined with
/// single spaces and the total divided by the sentence count of that
/// rejoined text.
pub fn linsear_write_formula(text: &str, lang: &str) -> f64 {
    let tokens: Vec<&str> = text.split_whitespace().take(LINSEAR_WINDOW).collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let points: usize = tokens
        .iter()
        .map(|token| if count_syllables(token, lang) < 3 { 1 } else { 3 })
        .sum();

    let window = tokens.join(" ");
    let mut number = points as f64 / count_sentences_nonzero(&window) as f64;
    if number <= 20.0 {
        number -= 2.0;
    }
    number / 2.0
}

/// New Dale-Chall readability score.
///
/// Every word outside the easy list is difficult here, whatever its
/// syllable count. Above five percent difficult words the score gets the
/// 3.6365 adjustment.
pub fn dale_chall_readability_score<C: Counts + ?Sized>(counts: &C, text: &str, lang: &str) -> f64 {
    let words = word_count(counts, text);
    if words == 0.0 {
        return 0.0;
    }
    let difficult = counts.difficult_words(text, lang, 0) as f64;
    let percent_difficult = 100.0 * difficult / words;

    let score = 0.1579f64.mul_add(percent_difficult, 0.0496 * counts.avg_sentence_length(text));
    if percent_difficult > 5.0 {
        score + 3.6365
    } else {
        score
    }
}

/// Gunning Fog index, using the language's syllable threshold.
///
/// # Errors
///
/// Returns [`StatError::UnknownConfigKey`] when the threshold is missing.
pub fn gunning_fog<C: Counts + ?Sized>(counts: &C, text: &str, lang: &str) -> StatResult<f64> {
    let threshold = counts.lang_cfg(lang, ConfigKey::SyllableThreshold)?;
    let words = word_count(counts, text);
    if words == 0.0 {
        return Ok(0.0);
    }
    let difficult = counts.difficult_words(text, lang, threshold.max(0.0) as usize) as f64;
    Ok(0.4 * (counts.avg_sentence_length(text) + 100.0 * difficult / words))
}

/// Lix: sentence length plus the percentage of words over six letters.
pub fn lix<C: Counts + ?Sized>(counts: &C, text: &str) -> f64 {
    let words = word_count(counts, text);
    if words == 0.0 {
        return 0.0;
    }
    let long = counts.long_words(text, LONG_WORD_THRESHOLD) as f64;
    counts.avg_sentence_length(text) + 100.0 * long / words
}

/// Rix: words over six letters per sentence.
pub fn rix<C: Counts + ?Sized>(counts: &C, text: &str) -> f64 {
    ratio(
        counts.long_words(text, LONG_WORD_THRESHOLD) as f64,
        counts.sentences(text) as f64,
    )
}

/// Spache readability, for early-grade text.
pub fn spache_readability<C: Counts + ?Sized>(counts: &C, text: &str, lang: &str) -> f64 {
    let words = word_count(counts, text);
    if words == 0.0 {
        return 0.0;
    }
    let percent_difficult = 100.0 * counts.difficult_words(text, lang, 2) as f64 / words;
    0.141f64.mul_add(counts.avg_sentence_length(text), 0.086 * percent_difficult) + 0.839
}

/// McAlpine EFLAW: words plus miniwords, per sentence.
pub fn mcalpine_eflaw<C: Counts + ?Sized>(counts: &C, text: &str) -> f64 {
    ratio(
        (counts.words(text, true) + counts.miniwords(text, MINIWORD_MAX_SIZE)) as f64,
        counts.sentences(text) as f64,
    )
}

/// Fernández Huerta reading ease.
pub fn fernandez_huerta<C: Counts + ?Sized>(counts: &C, text: &str, lang: &str) -> f64 {
    if counts.words(text, true) == 0 {
        return 0.0;
    }
    60.0f64.mul_add(
        -counts.avg_syllables_per_word(text, lang),
        1.02f64.mul_add(-counts.avg_sentence_length(text), 206.84),
    )
}

/// Szigriszt-Pazos perspicuity.
pub fn szigriszt_pazos<C: Counts + ?Sized>(counts: &C, text: &str, lang: &str) -> f64 {
    let words = word_count(counts, text);
    let sentences = counts.sentences(text) as f64;
    if words == 0.0 || sentences == 0.0 {
        return 0.0;
    }
    let syllables = counts.syllables(text, lang) as f64;
    62.3f64.mul_add(-(syllables / words), 206.835) - words / sentences
}

/// Gutiérrez de Polini comprehensibility.
pub fn gutierrez_polini<C: Counts + ?Sized>(counts: &C, text: &str) -> f64 {
    let words = word_count(counts, text);
    let sentences = counts.sentences(text) as f64;
    if words == 0.0 || sentences == 0.0 {
        return 0.0;
    }
    let letters = counts.letters(text) as f64;
    9.7f64.mul_add(-(letters / words), 95.2) - 0.35 * (words / sentences)
}

/// Crawford: years of schooling needed.
pub fn crawford<C: Counts + ?Sized>(counts: &C, text: &str, lang: &str) -> f64 {
    let words = word_count(counts, text);
    if words == 0.0 {
        return 0.0;
    }
    let sentences_per_hundred = 100.0 * counts.sentences(text) as f64 / words;
    let syllables_per_hundred = 100.0 * counts.syllables(text, lang) as f64 / words;
    (-0.205f64).mul_add(sentences_per_hundred, 0.049 * syllables_per_hundred) - 3.407
}

/// Gulpease index.
pub fn gulpease_index<C: Counts + ?Sized>(counts: &C, text: &str) -> f64 {
    let words = word_count(counts, text);
    if words == 0.0 {
        return 0.0;
    }
    let sentences = counts.sentences(text) as f64;
    let chars = counts.chars(text, true) as f64;
    300.0f64.mul_add(sentences / words, -10.0 * chars / words) + 89.0
}

/// Osman, the Arabic adaptation of Flesch.
pub fn osman<C: Counts + ?Sized>(counts: &C, text: &str) -> f64 {
    let words = word_count(counts, text);
    if words == 0.0 {
        return 0.0;
    }
    let complex = counts.complex_arabic_words(text) as f64 / words;
    let syllables = counts.arabic_syllables(text) as f64 / words;
    let faseeh = counts.faseeh(text) as f64 / words;
    let long = counts.arabic_long_words(text) as f64 / words;

    1.015f64.mul_add(
        -counts.avg_sentence_length(text),
        24.181f64.mul_add(-(complex + syllables + faseeh + long), 200.791),
    )
}

/// Wiener Sachtextformel, variants 1 to 4.
///
/// # Errors
///
/// Returns [`StatError::InvalidVariant`] for any other variant.
pub fn wiener_sachtextformel<C: Counts + ?Sized>(
    counts: &C,
    text: &str,
    lang: &str,
    variant: u8,
) -> StatResult<f64> {
    if !(1..=4).contains(&variant) {
        return Err(StatError::InvalidVariant {
            formula: "wiener_sachtextformel",
            variant,
        });
    }

    let words = word_count(counts, text);
    if words == 0.0 {
        return Ok(0.0);
    }

    let ms = 100.0 * counts.polysyllable_words(text, lang) as f64 / words;
    let sl = counts.avg_sentence_length(text);
    let iw = 100.0 * counts.long_words(text, LONG_WORD_THRESHOLD) as f64 / words;
    let es = 100.0 * counts.monosyllable_words(text, lang) as f64 / words;

    let score = match variant {
        1 => 0.1935 * ms + 0.1672 * sl + 0.1297 * iw - 0.0327 * es - 0.875,
        2 => 0.2007 * ms + 0.1682 * sl + 0.1373 * iw - 2.779,
        3 => 0.2963 * ms + 0.1905 * sl - 1.1144,
        _ => 0.2744 * ms + 0.2656 * sl - 1.693,
    };
    Ok(score)
}
