//! Pronunciation dictionary in CMU format.
//!
//! Each line holds a word, two spaces and its ARPAbet phones. Vowel phones
//! carry a stress digit (`AH0`, `EY1`), so counting the phones that end in a
//! digit gives the syllable count of that pronunciation. Alternate
//! pronunciations are marked `WORD(2)`, `WORD(3)`.
//!
//! A compact word list is embedded. A complete dictionary file (such as
//! `cmudict.dict` from the CMU Pronouncing Dictionary) can be installed once
//! per process with [`load_file`]; its entries are consulted first.

use std::collections::HashMap;
use std::sync::{LazyLock, OnceLock};

use camino::Utf8Path;

use crate::error::{ResourceError, ResourceResult};

const CMUDICT: &str = include_str!("../../resources/cmudict-subset.dict");

/// Pronunciations keyed by lowercase word.
static PRONUNCIATIONS: LazyLock<HashMap<String, Vec<Vec<&'static str>>>> = LazyLock::new(|| {
    let map = parse(CMUDICT);
    tracing::debug!(entries = map.len(), "loaded pronunciation dictionary");
    map
});

/// Syllable counts from an installed dictionary file, largest alternate kept.
static INSTALLED: OnceLock<HashMap<String, usize>> = OnceLock::new();

fn parse(source: &str) -> HashMap<String, Vec<Vec<&str>>> {
    let mut map: HashMap<String, Vec<Vec<&str>>> = HashMap::new();
    for (word, phones) in entries(source) {
        map.entry(word).or_default().push(phones);
    }
    map
}

/// Lowercased headword and phones of every entry line.
///
/// Comment lines (`;;;`), blank lines and trailing `#` comments are skipped.
fn entries(source: &str) -> impl Iterator<Item = (String, Vec<&str>)> {
    source.lines().filter_map(|line| {
        if line.starts_with(";;;") {
            return None;
        }
        let line = line.split_once(" #").map_or(line, |(entry, _)| entry);
        let mut fields = line.split_whitespace();
        let head = fields.next()?;
        let word = head
            .split_once('(')
            .map_or(head, |(word, _)| word)
            .to_lowercase();
        let phones: Vec<&str> = fields.collect();
        (!phones.is_empty()).then_some((word, phones))
    })
}

fn syllable_table(source: &str) -> HashMap<String, usize> {
    let mut table: HashMap<String, usize> = HashMap::new();
    for (word, phones) in entries(source) {
        let count = syllables_in_phones(&phones);
        table
            .entry(word)
            .and_modify(|best| *best = (*best).max(count))
            .or_insert(count);
    }
    table
}

/// Install a complete CMU-format dictionary from `path`.
///
/// Returns the number of distinct words loaded. Only one dictionary can be
/// installed per process.
///
/// # Errors
///
/// Returns [`ResourceError::Read`] when the file cannot be read and
/// [`ResourceError::AlreadyInstalled`] on a second call.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn load_file(path: &Utf8Path) -> ResourceResult<usize> {
    if INSTALLED.get().is_some() {
        return Err(ResourceError::AlreadyInstalled);
    }
    let bytes = std::fs::read(path).map_err(|source| ResourceError::Read {
        path: path.to_owned(),
        source,
    })?;
    // cmudict ships as UTF-8 but older releases carry Latin-1 bytes in comments.
    let source = String::from_utf8_lossy(&bytes);
    install(&source)
}

/// Install a dictionary from CMU-format text. See [`load_file`].
///
/// # Errors
///
/// Returns [`ResourceError::AlreadyInstalled`] if a dictionary is already in place.
pub fn install(source: &str) -> ResourceResult<usize> {
    let table = syllable_table(source);
    let words = table.len();
    INSTALLED
        .set(table)
        .map_err(|_| ResourceError::AlreadyInstalled)?;
    tracing::info!(words, "installed pronunciation dictionary");
    Ok(words)
}

/// Count the stressed-vowel phones in one pronunciation.
pub fn syllables_in_phones(phones: &[&str]) -> usize {
    phones
        .iter()
        .filter(|phone| phone.ends_with(|c: char| c.is_ascii_digit()))
        .count()
}

/// Look up the syllable count of `word`.
///
/// An installed dictionary is consulted before the embedded list. When a
/// word has several pronunciations the largest count wins.
pub fn lookup_syllables(word: &str) -> Option<usize> {
    let word = word.to_lowercase();
    if let Some(count) = INSTALLED.get().and_then(|table| table.get(&word)) {
        return Some(*count);
    }
    PRONUNCIATIONS
        .get(&word)?
        .iter()
        .map(|phones| syllables_in_phones(phones))
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_lookup() {
        assert_eq!(lookup_syllables("the"), Some(1));
        assert_eq!(lookup_syllables("dog"), Some(1));
        assert_eq!(lookup_syllables("regardless"), Some(3));
        assert_eq!(lookup_syllables("ability"), Some(4));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup_syllables("Where"), Some(1));
        assert_eq!(lookup_syllables("WHERE"), Some(1));
    }

    #[test]
    fn largest_alternate_wins() {
        assert_eq!(PRONUNCIATIONS["fire"].len(), 2);
        assert_eq!(lookup_syllables("fire"), Some(2));
        assert_eq!(lookup_syllables("chocolate"), Some(3));
    }

    #[test]
    fn contractions_are_entries() {
        assert_eq!(lookup_syllables("they're"), Some(1));
        assert_eq!(lookup_syllables("don't"), Some(1));
    }

    #[test]
    fn unknown_word() {
        assert_eq!(lookup_syllables("zzyzx"), None);
        assert_eq!(lookup_syllables(""), None);
    }

    #[test]
    fn comments_are_skipped() {
        let map = parse(";;; header\nCAT  K AE1 T\n\nCAT(2)  K AE1 T S\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map["cat"].len(), 2);
        assert!(PRONUNCIATIONS.len() > 300);
    }

    #[test]
    fn inline_comments_are_dropped() {
        let table = syllable_table("READ  R EH1 D # past\nREAD(2)  R IY1 D\nIDEA  AY0 D IY1 AH0\n");
        assert_eq!(table["read"], 1);
        assert_eq!(table["idea"], 3);
    }

    #[test]
    fn installed_dictionary_is_consulted_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::try_from(dir.path().join("cmudict.dict")).unwrap();
        std::fs::write(&path, ";;; test dictionary\nqwrtz  K W ER1 T S AH0\nqwrtz(2)  K W ER1 T S\n").unwrap();

        assert_eq!(lookup_syllables("qwrtz"), None);
        assert_eq!(load_file(&path).unwrap(), 1);
        assert_eq!(lookup_syllables("QWRTZ"), Some(2));
        // Embedded entries still resolve.
        assert_eq!(lookup_syllables("regardless"), Some(3));
        assert!(matches!(load_file(&path), Err(ResourceError::AlreadyInstalled)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_file(Utf8Path::new("/nonexistent/cmudict.dict"));
        assert!(matches!(
            err,
            Err(ResourceError::Read { .. } | ResourceError::AlreadyInstalled)
        ));
    }

    #[test]
    fn stress_digits_mark_vowels() {
        assert_eq!(syllables_in_phones(&["AH0", "B", "IH1", "L"]), 2);
        assert_eq!(syllables_in_phones(&[]), 0);
    }
}
