//! Configuration as the binary sees it.
//!
//! Each test lays out config files in a temp tree, runs `readstat` there,
//! and checks the effective settings through `info --json` or through the
//! counts and scores they change.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const TEXT: &str = "The cat sat on the mat. The dog ran off fast.";

#[allow(deprecated)]
fn readstat(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("READSTAT_LANG")
        .env_remove("READSTAT_CACHE_CAPACITY")
        .args(["-C", dir.to_str().unwrap()]);
    cmd
}

fn json_of(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "readstat failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// The `config` object of `info --json`.
fn effective(dir: &Path) -> Value {
    json_of(readstat(dir).args(["info", "--json"]))["config"].clone()
}

fn fre(dir: &Path) -> f64 {
    let json = json_of(readstat(dir).args(["score", "doc.txt", "-f", "flesch_reading_ease", "--json"]));
    json["scores"][0]["score"].as_f64().unwrap()
}

// Discovery

#[test]
fn defaults_without_any_file() {
    let tmp = TempDir::new().unwrap();
    let config = effective(tmp.path());

    assert!(config["config_file"].is_null());
    assert_eq!(config["lang"], "en_US");
    assert_eq!(config["cache_capacity"], readstat_core::DEFAULT_CACHE_CAPACITY);
    assert_eq!(config["max_input_bytes"], readstat_core::DEFAULT_MAX_INPUT_BYTES);
    assert_eq!(config["language_overrides"], Value::Array(vec![]));
}

#[test]
fn dotfile_and_plain_name_are_both_found() {
    for name in [".readstat.toml", "readstat.toml"] {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(name), "lang = \"nl\"\ncache_capacity = 32\n").unwrap();

        let config = effective(tmp.path());
        assert_eq!(config["lang"], "nl", "{name}");
        assert_eq!(config["cache_capacity"], 32, "{name}");
        assert!(config["config_file"].as_str().unwrap().ends_with(name));
    }
}

#[test]
fn parent_directories_are_searched_up_to_git() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let docs = repo.join("docs").join("guide");
    fs::create_dir_all(&docs).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(tmp.path().join(".readstat.toml"), "lang = \"ru\"\n").unwrap();

    // Outside the repository boundary.
    assert_eq!(effective(&docs)["lang"], "en_US");

    fs::write(repo.join(".readstat.toml"), "lang = \"pl\"\n").unwrap();
    assert_eq!(effective(&docs)["lang"], "pl");
}

// Formats

#[test]
fn language_overrides_parse_from_every_format() {
    let files = [
        (".readstat.toml", "[languages.sv]\nfre_base = 206.835\nfre_syll_per_word = 58.5\n"),
        (".readstat.yaml", "languages:\n  sv:\n    fre_base: 206.835\n    fre_syll_per_word: 58.5\n"),
        (".readstat.yml", "languages:\n  sv:\n    fre_base: 206.835\n    fre_syll_per_word: 58.5\n"),
        (".readstat.json", r#"{"languages": {"sv": {"fre_base": 206.835, "fre_syll_per_word": 58.5}}}"#),
    ];
    for (name, body) in files {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(name), body).unwrap();
        assert_eq!(effective(tmp.path())["language_overrides"][0], "sv", "{name}");
    }
}

#[test]
fn malformed_files_fail_with_a_config_error() {
    let files = [
        (".readstat.toml", "lang = [[["),
        (".readstat.yaml", "invalid:\n  yaml\n content:\n[broken"),
        (".readstat.json", "{lang: fr}"),
        (".readstat.toml", "cache_capacity = \"lots\"\n"),
    ];
    for (name, body) in files {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(name), body).unwrap();
        readstat(tmp.path())
            .arg("info")
            .assert()
            .failure()
            .stderr(predicate::str::contains("configuration"));
    }
}

#[test]
fn unknown_keys_are_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readstat.toml"), "lang = \"it\"\nsmog_floor = 3\n").unwrap();
    assert_eq!(effective(tmp.path())["lang"], "it");
}

// Precedence

#[test]
fn nearest_config_directory_wins() {
    let tmp = TempDir::new().unwrap();
    let chapter = tmp.path().join("chapter");
    fs::create_dir(&chapter).unwrap();
    fs::write(tmp.path().join(".readstat.toml"), "lang = \"de\"\ncache_capacity = 8\n").unwrap();
    fs::write(chapter.join(".readstat.toml"), "lang = \"fr\"\n").unwrap();

    let config = effective(&chapter);
    assert_eq!(config["lang"], "fr");
    // Only the nearest directory with config files is read.
    assert_eq!(config["cache_capacity"], readstat_core::DEFAULT_CACHE_CAPACITY);
}

#[test]
fn explicit_file_beats_project_and_env_beats_both() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readstat.toml"), "lang = \"de\"\n").unwrap();
    let explicit = tmp.path().join("house-style.yaml");
    fs::write(&explicit, "lang: es\nmax_grade: 9.0\n").unwrap();

    let config = json_of(readstat(tmp.path()).args([
        "--config",
        explicit.to_str().unwrap(),
        "info",
        "--json",
    ]))["config"]
        .clone();
    assert_eq!(config["lang"], "es");
    assert_eq!(config["max_grade"], 9.0);
    assert!(config["config_file"].as_str().unwrap().ends_with("house-style.yaml"));

    let config = json_of(
        readstat(tmp.path())
            .env("READSTAT_LANG", "hu")
            .env("READSTAT_CACHE_CAPACITY", "4")
            .args(["--config", explicit.to_str().unwrap(), "info", "--json"]),
    )["config"]
        .clone();
    assert_eq!(config["lang"], "hu");
    assert_eq!(config["cache_capacity"], 4);
}

// Settings reaching the counters

#[test]
fn configured_lang_is_used_for_counting() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readstat.toml"), "lang = \"fr\"\n").unwrap();
    fs::write(tmp.path().join("doc.txt"), "Le chat est noir.").unwrap();

    let reports = json_of(readstat(tmp.path()).args(["stats", "doc.txt", "--json"]));
    assert_eq!(reports[0]["lang"], "fr");
    assert_eq!(reports[0]["words"], 4);

    // The flag still wins over the file.
    let reports = json_of(readstat(tmp.path()).args(["stats", "doc.txt", "--lang", "it", "--json"]));
    assert_eq!(reports[0]["lang"], "it");
}

#[test]
fn fre_base_override_shifts_the_score() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("doc.txt"), TEXT).unwrap();

    let builtin = fre(tmp.path());
    fs::write(tmp.path().join(".readstat.toml"), "[languages.en]\nfre_base = 100.0\n").unwrap();
    let overridden = fre(tmp.path());

    assert!((builtin - overridden - 106.835).abs() < 1e-6);
}

#[test]
fn syllable_threshold_override_changes_difficult_words() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("doc.txt"), "Regardless of the weather, the committee met.").unwrap();

    let builtin = json_of(readstat(tmp.path()).args(["difficult", "doc.txt", "--json"]));
    assert_eq!(builtin["threshold"], 3);
    assert_eq!(builtin["words"][0], "regardless");

    fs::write(tmp.path().join(".readstat.toml"), "[languages.en]\nsyllable_threshold = 4.0\n").unwrap();
    let raised = json_of(readstat(tmp.path()).args(["difficult", "doc.txt", "--json"]));
    assert_eq!(raised["threshold"], 4);
    assert_eq!(raised["count"], 0);
}

#[test]
fn unknown_language_warns_and_counts_as_english() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("doc.txt"), TEXT).unwrap();

    readstat(tmp.path())
        .args(["stats", "doc.txt", "--lang", "xx", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"words\": 11"))
        .stderr(predicate::str::contains("no formula constants for language"));
}

#[test]
fn input_limit_can_be_lowered_and_disabled() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("doc.txt"), TEXT).unwrap();
    fs::write(tmp.path().join(".readstat.toml"), "max_input_bytes = 8\n").unwrap();

    assert_eq!(effective(tmp.path())["max_input_bytes"], 8);
    readstat(tmp.path())
        .args(["stats", "doc.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));

    fs::write(
        tmp.path().join(".readstat.toml"),
        "max_input_bytes = 8\ndisable_input_limit = true\n",
    )
    .unwrap();
    assert!(effective(tmp.path())["max_input_bytes"].is_null());
    readstat(tmp.path()).args(["stats", "doc.txt"]).assert().success();
}

#[test]
fn pronunciation_dictionary_file_is_loaded() {
    let tmp = TempDir::new().unwrap();
    // Not an English word, so the heuristic alone would say one syllable.
    fs::write(tmp.path().join("doc.txt"), "Qwrtz.").unwrap();
    fs::write(tmp.path().join("cmudict.dict"), ";;; local\nqwrtz  K W ER1 T S AH0\n").unwrap();

    let before = json_of(readstat(tmp.path()).args(["stats", "doc.txt", "--json"]));
    assert_eq!(before[0]["syllables"], 1);

    fs::write(tmp.path().join(".readstat.toml"), "pronunciation_dict = \"cmudict.dict\"\n").unwrap();
    assert_eq!(effective(tmp.path())["pronunciation_dict"], "cmudict.dict");
    let after = json_of(readstat(tmp.path()).args(["stats", "doc.txt", "--json"]));
    assert_eq!(after[0]["syllables"], 2);
}

#[test]
fn missing_pronunciation_dictionary_is_an_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("doc.txt"), TEXT).unwrap();
    fs::write(tmp.path().join(".readstat.toml"), "pronunciation_dict = \"nope.dict\"\n").unwrap();

    readstat(tmp.path())
        .args(["stats", "doc.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load pronunciation dictionary"));
}
