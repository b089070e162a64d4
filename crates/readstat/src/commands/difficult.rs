//! Difficult command: words outside the easy-word list.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use readstat_core::difficult::list_difficult_words;
use readstat_core::{Config, ConfigKey, Counts, TextStats};
use serde::Serialize;
use tracing::{debug, instrument};

use super::{read_prose, resolve_lang};

/// Arguments for the `difficult` subcommand.
#[derive(Args, Debug)]
pub struct DifficultArgs {
    /// File to scan.
    pub file: Utf8PathBuf,

    /// Language tag (defaults to the configured `lang`).
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Minimum syllables for a word to count (defaults to the language's threshold).
    #[arg(short, long)]
    pub threshold: Option<usize>,
}

#[derive(Serialize)]
struct DifficultReport<'a> {
    file: &'a Utf8PathBuf,
    threshold: usize,
    count: usize,
    words: &'a [String],
}

/// Print each distinct difficult word, in order of first appearance.
#[instrument(name = "cmd_difficult", skip_all, fields(file = %args.file))]
pub fn cmd_difficult(
    args: DifficultArgs,
    global_json: bool,
    stats: &TextStats,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let lang = resolve_lang(args.lang.as_deref(), config, stats);
    let threshold = match args.threshold {
        Some(threshold) => threshold,
        None => stats
            .lang_cfg(lang, ConfigKey::SyllableThreshold)
            .with_context(|| format!("no syllable threshold for {lang}"))?
            .max(0.0) as usize,
    };
    debug!(lang, threshold, "executing difficult command");

    let text = read_prose(&args.file, max_input_bytes)?;
    let words = list_difficult_words(&text, threshold, lang);

    if global_json {
        let report = DifficultReport {
            file: &args.file,
            threshold,
            count: words.len(),
            words: &words,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for word in &words {
            println!("{word}");
        }
    }
    Ok(())
}
