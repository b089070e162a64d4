//! Core library for readstat.
//!
//! Text statistics and readability formulas for English and a handful of
//! other languages. The layers, bottom up:
//!
//! - [`text`] - punctuation removal, word listing and sentence segmentation
//! - [`language`] - per-language formula constants
//! - [`syllables`] and [`arabic`] - syllable estimation
//! - [`difficult`] - words outside the easy-word list
//! - [`counts`] - aggregate counters and averages
//! - [`formulas`] - the readability scores
//! - [`stats`] - [`TextStats`], which memoizes every counter in an LRU [`cache`]
//!
//! Plus the ambient modules:
//!
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`markdown`] - Markdown to prose
//!
//! # Quick Start
//!
//! ```
//! use readstat_core::{Counts, Formula, TextStats};
//!
//! let stats = TextStats::default();
//! let text = "The cat sat on the mat. The dog ran off fast.";
//!
//! assert_eq!(stats.words(text, true), 11);
//! let grade = stats.score(Formula::FleschKincaidGrade, text, "en_US").unwrap();
//! assert!(grade < 2.0);
//! ```
#![deny(unsafe_code)]

pub mod arabic;
pub mod cache;
pub mod config;
pub mod counts;
pub mod dictionaries;
pub mod difficult;
pub mod error;
pub mod formulas;
pub mod language;
pub mod markdown;
pub mod stats;
pub mod syllables;
pub mod text;

pub use cache::{CacheStats, DEFAULT_CACHE_CAPACITY};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, ResourceError, ResourceResult, StatError, StatResult};
pub use formulas::Formula;
pub use language::{ConfigKey, LangConfig, LanguageTable, get_lang_cfg};
pub use stats::{Counter, Counts, TextReport, TextStats, Uncached};

/// Default maximum input size: 5 MiB.
///
/// Inputs larger than this are rejected unless the limit is raised or disabled
/// in configuration.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
