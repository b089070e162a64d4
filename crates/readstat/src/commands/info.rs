//! Info command: package version and the effective configuration.

use clap::Args;
use owo_colors::OwoColorize;
use readstat_core::config::{Config, ConfigSources};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Serialize)]
struct Info {
    name: &'static str,
    version: &'static str,
    license: &'static str,
    config: Effective,
}

/// Settings after every config layer has been merged.
#[derive(Serialize)]
struct Effective {
    config_file: Option<String>,
    log_level: &'static str,
    lang: String,
    cache_capacity: usize,
    max_grade: Option<f64>,
    /// `None` when the limit is disabled.
    max_input_bytes: Option<usize>,
    pronunciation_dict: Option<String>,
    language_overrides: Vec<String>,
}

impl Effective {
    fn new(config: &Config, sources: &ConfigSources) -> Self {
        let mut language_overrides: Vec<String> = config.languages.keys().cloned().collect();
        language_overrides.sort();
        Self {
            config_file: sources.primary_file().map(ToString::to_string),
            log_level: config.log_level.as_str(),
            lang: config.lang.clone(),
            cache_capacity: config.cache_capacity,
            max_grade: config.max_grade,
            max_input_bytes: config.input_limit(),
            pronunciation_dict: config.pronunciation_dict.as_ref().map(ToString::to_string),
            language_overrides,
        }
    }

    fn rows(&self) -> [(&'static str, String); 8] {
        let or_unset = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
        [
            ("Config file", or_unset(self.config_file.clone())),
            ("Log level", self.log_level.to_string()),
            ("Language", self.lang.clone()),
            ("Cache capacity", self.cache_capacity.to_string()),
            ("Max grade", or_unset(self.max_grade.map(|grade| format!("{grade:.1}")))),
            (
                "Input limit",
                self.max_input_bytes
                    .map_or_else(|| "disabled".to_string(), |bytes| format!("{bytes} bytes")),
            ),
            ("Pronunciations", or_unset(self.pronunciation_dict.clone())),
            ("Language overrides", or_unset(Some(self.language_overrides.join(", ")).filter(|s| !s.is_empty()))),
        ]
    }
}

/// Print the package version and effective configuration.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let info = Info {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        license: env!("CARGO_PKG_LICENSE"),
        config: Effective::new(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} {} ({})", info.name.bold(), info.version.green(), info.license);
    for (label, value) in info.config.rows() {
        println!("  {:<20}{}", format!("{label}:").dimmed(), value);
    }
    Ok(())
}
