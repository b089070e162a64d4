//! readstat CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use readstat::{Cli, Commands, commands};
use readstat_core::TextStats;
use readstat_core::config::ConfigLoader;
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let (mut config, config_sources) = loader.load().context("failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        "CLI initialized"
    );

    if let Some(ref path) = config.pronunciation_dict {
        let words = readstat_core::dictionaries::pronunciation::load_file(path)
            .with_context(|| format!("failed to load pronunciation dictionary {path}"))?;
        debug!(words, "pronunciation dictionary installed");
    }

    let max_input = config.input_limit();
    let stats = TextStats::from_config(&config);

    let result = match command {
        Commands::Stats(args) => {
            commands::stats::cmd_stats(args, cli.json, &stats, &config, max_input)
        }
        Commands::Score(args) => {
            commands::score::cmd_score(args, cli.json, &stats, &config, max_input)
        }
        Commands::Difficult(args) => {
            commands::difficult::cmd_difficult(args, cli.json, &stats, &config, max_input)
        }
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &config_sources),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
