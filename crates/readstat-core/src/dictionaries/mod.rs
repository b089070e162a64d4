//! Embedded linguistic resources.
//!
//! Every resource is compiled into the binary and parsed on first use:
//! pronunciations for English syllable counts, easy-word vocabularies for
//! the difficult-word selector, and hyphenation patterns for other languages.

pub mod easy_words;
pub mod hyphenation;
pub mod pronunciation;
