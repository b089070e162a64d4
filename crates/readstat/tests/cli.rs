//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn short_help_flag_shows_usage() {
    cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn short_version_flag_shows_version() {
    cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn info_json_contains_expected_fields() {
    cmd()
        .arg("info")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\""))
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn info_help_shows_command_options() {
    cmd()
        .args(["info", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn short_quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}

#[test]
fn verbose_flag_accepted() {
    cmd().args(["--verbose", "info"]).assert().success();
}

#[test]
fn short_verbose_flag_accepted() {
    cmd().args(["-v", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_auto_accepted() {
    cmd().args(["--color", "auto", "info"]).assert().success();
}

#[test]
fn color_always_accepted() {
    cmd().args(["--color", "always", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_flag_shows_error() {
    cmd()
        .arg("--not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Stats Command
// =============================================================================

const EASY: &str = "The cat sat on the mat. The dog ran off fast.";
const HARD: &str = "Regardless of the committee's extraordinary considerations, \
unquestionably sophisticated deliberations continued indefinitely.";

fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

#[test]
fn stats_prints_counts() {
    let (_dir, path) = write_temp("easy.txt", EASY);
    cmd()
        .args(["stats", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Words:"))
        .stdout(predicate::str::contains("11"));
}

#[test]
fn stats_json_has_report_fields() {
    let (_dir, path) = write_temp("easy.txt", EASY);
    let output = cmd().args(["stats", &path, "--json"]).assert().success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json[0]["words"], 11);
    assert_eq!(json[0]["sentences"], 2);
    assert_eq!(json[0]["lang"], "en_US");
}

#[test]
fn stats_handles_several_files() {
    let (_dir, first) = write_temp("a.txt", EASY);
    let (_dir2, second) = write_temp("b.txt", HARD);
    let output = cmd()
        .args(["stats", &first, &second, "--json"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn stats_strips_markdown() {
    let (_dir, path) = write_temp(
        "doc.md",
        "# Heading\n\n```\ncode code code\n```\n\nThe cat sat.",
    );
    let output = cmd().args(["stats", &path, "--json"]).assert().success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json[0]["words"], 4);
    assert_eq!(json[0]["sentences"], 1);
}

#[test]
fn stats_missing_file_fails() {
    cmd()
        .args(["stats", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn stats_requires_a_file() {
    cmd().arg("stats").assert().failure();
}

// =============================================================================
// Score Command
// =============================================================================

#[test]
fn score_runs_every_formula_by_default() {
    let (_dir, path) = write_temp("easy.txt", EASY);
    cmd()
        .args(["score", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("flesch_reading_ease"))
        .stdout(predicate::str::contains("gunning_fog"))
        .stdout(predicate::str::contains("wiener_sachtextformel:1"));
}

#[test]
fn score_selected_formulas_in_order() {
    let (_dir, path) = write_temp("easy.txt", EASY);
    let output = cmd()
        .args(["score", &path, "--formula", "lix", "-f", "rix", "--json"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    let scores = json["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0]["formula"], "lix");
    assert_eq!(scores[1]["formula"], "rix");
}

#[test]
fn score_unknown_formula_fails() {
    let (_dir, path) = write_temp("easy.txt", EASY);
    cmd()
        .args(["score", &path, "--formula", "fog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown formula"));
}

#[test]
fn score_bad_wiener_variant_fails() {
    let (_dir, path) = write_temp("easy.txt", EASY);
    cmd()
        .args(["score", &path, "--formula", "wiener_sachtextformel:7", "--lang", "de"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no variant 7"));
}

#[test]
fn score_max_grade_passes_simple_text() {
    let (_dir, path) = write_temp("easy.txt", EASY);
    cmd()
        .args(["score", &path, "--formula", "lix", "--max-grade", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS:"));
}

#[test]
fn score_max_grade_fails_complex_text() {
    let (_dir, path) = write_temp("hard.txt", HARD);
    cmd()
        .args(["score", &path, "--max-grade", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max: 5.0"));
}

#[test]
fn score_json_reports_over_max() {
    let (_dir, path) = write_temp("hard.txt", HARD);
    let output = cmd()
        .args(["score", &path, "--max-grade", "5", "--json"])
        .assert()
        .failure();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["over_max"], true);
}

// =============================================================================
// Difficult Command
// =============================================================================

#[test]
fn difficult_lists_hard_words_once() {
    let (_dir, path) = write_temp(
        "doc.txt",
        "The committee met regardless of the weather. The committee left.",
    );
    let output = cmd().args(["difficult", &path]).assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let words: Vec<&str> = stdout.lines().collect();
    assert!(words.contains(&"committee"));
    assert!(words.contains(&"regardless"));
    assert!(!words.contains(&"weather"));
    assert_eq!(words.iter().filter(|w| **w == "committee").count(), 1);
}

#[test]
fn difficult_json_reports_threshold() {
    let (_dir, path) = write_temp("doc.txt", EASY);
    let output = cmd()
        .args(["difficult", &path, "--threshold", "3", "--json"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["threshold"], 3);
    assert_eq!(json["count"], 0);
}
