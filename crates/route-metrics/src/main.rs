use anyhow::{Context, Result};
use clap::Parser;
use route_metrics_lib::{Config, pipeline};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod settings;

use settings::{Command, Settings};

fn main() -> Result<()> {
    let settings = Settings::parse();
    init_logging(settings.verbose);

    let start = Instant::now();
    let result = run(settings);
    tracing::info!("Runtime: {:?}", start.elapsed());
    result
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(settings: Settings) -> Result<()> {
    match settings.command {
        Command::Generate { input, output } => {
            let config = build_config(&settings.unit, input, output)?;
            let report = pipeline::generate(&config).with_context(|| {
                format!("failed to generate {}", config.store_path.display())
            })?;
            println!(
                "Wrote {} records from {} files ({} tracks) to {}",
                report.records,
                report.files,
                report.tracks,
                config.store_path.display()
            );
        }
        Command::Report { store, input, json } => {
            let config = build_config(&settings.unit, input, store)?;
            let summary = pipeline::report(&config).with_context(|| {
                format!("failed to summarize {}", config.store_path.display())
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
        }
    }
    Ok(())
}

/// Validate the unit before any path is looked at
fn build_config(unit: &str, input: PathBuf, store: PathBuf) -> Result<Config> {
    let config = Config::new(unit, input, store).context("invalid configuration")?;
    tracing::debug!("Using configuration {config:?}");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_unit_is_a_configuration_error() {
        let err = build_config("furlongs", "in".into(), "out.csv".into()).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown distance units: furlongs"));
    }
}
