//! Score command: readability formulas over one file.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use readstat_core::{Config, Formula, TextStats};
use serde::Serialize;
use tracing::{debug, instrument};

use super::{read_prose, resolve_lang};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File to score.
    pub file: Utf8PathBuf,

    /// Language tag (defaults to the configured `lang`).
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Formula to run (repeatable). Runs every formula when omitted.
    ///
    /// Wiener Sachtextformel takes a variant suffix, e.g.
    /// `wiener_sachtextformel:3`.
    #[arg(short, long, value_name = "NAME")]
    pub formula: Vec<Formula>,

    /// Fail when the Flesch-Kincaid grade is above this.
    #[arg(long)]
    pub max_grade: Option<f64>,
}

#[derive(Serialize)]
struct ScoreEntry {
    formula: String,
    score: f64,
}

#[derive(Serialize)]
struct ScoreReport {
    file: Utf8PathBuf,
    lang: String,
    scores: Vec<ScoreEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grade: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_grade: Option<f64>,
    over_max: bool,
}

/// Score a file with the requested formulas.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    stats: &TextStats,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let lang = resolve_lang(args.lang.as_deref(), config, stats);
    let max_grade = args.max_grade.or(config.max_grade);
    debug!(lang, formulas = args.formula.len(), max_grade = ?max_grade, "executing score command");

    let text = read_prose(&args.file, max_input_bytes)?;

    let formulas = if args.formula.is_empty() {
        Formula::ALL.to_vec()
    } else {
        args.formula
    };
    let scores = stats
        .scores(&formulas, &text, lang)
        .with_context(|| format!("failed to score {}", args.file))?;

    let grade = match max_grade {
        Some(_) => Some(stats.score(Formula::FleschKincaidGrade, &text, lang)?),
        None => None,
    };
    let over_max = matches!((grade, max_grade), (Some(grade), Some(max)) if grade > max);

    let report = ScoreReport {
        file: args.file,
        lang: lang.to_string(),
        scores: scores
            .into_iter()
            .map(|(formula, score)| ScoreEntry {
                formula: formula.to_string(),
                score,
            })
            .collect(),
        grade,
        max_grade,
        over_max,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &report.scores {
            println!("{:<32}{:.2}", format!("{}:", entry.formula).dimmed(), entry.score);
        }
    }

    if let (Some(grade), Some(max)) = (report.grade, report.max_grade) {
        if report.over_max {
            bail!(
                "{} scores grade {:.1} (max: {:.1}). Shorten sentences or use simpler words.",
                report.file,
                grade,
                max,
            );
        }
        if !global_json {
            println!("{} {} scores grade {:.1} (max: {:.1})", "PASS:".green(), report.file, grade, max);
        }
    }

    Ok(())
}
