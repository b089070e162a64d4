//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use readstat_core::{Config, TextStats, markdown};
use tracing::warn;

pub mod difficult;
pub mod info;
pub mod score;
pub mod stats;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read a file as prose: markdown files (`.md`) are stripped to plain text.
pub fn read_prose(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let content = read_input_file(path, max_bytes)?;
    if path.extension() == Some("md") {
        Ok(markdown::strip_to_prose(&content))
    } else {
        Ok(content)
    }
}

/// The language to count in: the `--lang` flag, else the configured default.
///
/// Languages missing from the table still work, resolving every constant
/// against `en`; that is logged as a warning.
pub fn resolve_lang<'a>(flag: Option<&'a str>, config: &'a Config, stats: &TextStats) -> &'a str {
    let lang = flag.unwrap_or(&config.lang);
    if !stats.table().knows(lang) {
        warn!(lang, "no formula constants for language, using en");
    }
    lang
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    #[test]
    fn flag_language_wins_over_config() {
        let config = Config::default();
        let stats = TextStats::from_config(&config);
        assert_eq!(resolve_lang(Some("de"), &config, &stats), "de");
        assert_eq!(resolve_lang(None, &config, &stats), "en_US");
        assert_eq!(resolve_lang(Some("xx"), &config, &stats), "xx");
    }

    #[test]
    fn oversized_input_is_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write(&tmp, "big.txt", "0123456789");
        let err = read_input_file(&path, Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
        assert!(read_input_file(&path, None).is_ok());
    }

    #[test]
    fn markdown_is_stripped_by_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let md = write(&tmp, "a.md", "# Title\n\n`code` here");
        let txt = write(&tmp, "a.txt", "# Title");
        assert_eq!(read_prose(&md, None).unwrap(), "Title.  here.");
        assert_eq!(read_prose(&txt, None).unwrap(), "# Title");
    }
}
