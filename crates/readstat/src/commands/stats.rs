//! Stats command: text statistics per file.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use readstat_core::{Config, TextReport, TextStats};
use serde::Serialize;
use tracing::{debug, instrument};

use super::{read_prose, resolve_lang};

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Files to count.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// Language tag (defaults to the configured `lang`).
    #[arg(short, long)]
    pub lang: Option<String>,
}

#[derive(Serialize)]
struct FileReport {
    file: Utf8PathBuf,
    #[serde(flatten)]
    report: TextReport,
}

/// Count every file and print one report each.
#[instrument(name = "cmd_stats", skip_all, fields(files = args.files.len()))]
pub fn cmd_stats(
    args: StatsArgs,
    global_json: bool,
    stats: &TextStats,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let lang = resolve_lang(args.lang.as_deref(), config, stats);
    debug!(lang, "executing stats command");

    let progress = if global_json || args.files.len() < 2 {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(args.files.len() as u64);
        bar.set_style(ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")?);
        bar
    };

    let mut reports = Vec::with_capacity(args.files.len());
    for file in args.files {
        progress.set_message(file.to_string());
        let text = read_prose(&file, max_input_bytes)?;
        let report = stats
            .report(&text, lang)
            .with_context(|| format!("failed to count {file}"))?;
        reports.push(FileReport { file, report });
        progress.inc(1);
    }
    progress.finish_and_clear();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for (idx, entry) in reports.iter().enumerate() {
        if idx > 0 {
            println!();
        }
        print_report(entry);
    }
    Ok(())
}

fn print_report(entry: &FileReport) {
    let report = &entry.report;
    println!("{} ({})", entry.file.bold(), report.lang);
    let rows: [(&str, String); 14] = [
        ("Characters", report.chars.to_string()),
        ("Characters with spaces", report.chars_with_spaces.to_string()),
        ("Letters", report.letters.to_string()),
        ("Words", report.words.to_string()),
        ("Sentences", report.sentences.to_string()),
        ("Syllables", report.syllables.to_string()),
        ("Difficult words", report.difficult_words.to_string()),
        ("Long words", report.long_words.to_string()),
        ("Miniwords", report.miniwords.to_string()),
        ("Monosyllable words", report.monosyllable_words.to_string()),
        ("Polysyllable words", report.polysyllable_words.to_string()),
        ("Words per sentence", format!("{:.2}", report.avg_sentence_length)),
        ("Syllables per word", format!("{:.2}", report.avg_syllables_per_word)),
        ("Reading time", format!("{:.1}s", report.reading_time_secs)),
    ];
    for (label, value) in rows {
        println!("  {:<24}{}", format!("{label}:").dimmed(), value);
    }
}
