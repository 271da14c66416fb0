use clap::{Parser, Subcommand};
use route_metrics_lib::config::{DEFAULT_INPUT_DIR, DEFAULT_STORE_PATH};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Route Metrics - compare geodesic and planar distances over a directory of GPX tracks
pub struct Settings {
    #[command(subcommand)]
    pub command: Command,

    /// Distance unit for every written distance (meters, kilometers, miles, feet, nautical)
    #[clap(short, long, default_value = "meters", global = true)]
    pub unit: String,

    /// Enable debug logging (RUST_LOG overrides)
    #[clap(short, long, default_value = "false", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Measure every segment of every GPX file and write the CSV record store
    Generate {
        /// Directory of GPX files
        #[clap(short, long, value_name = "DIR", default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// CSV record store to create
        #[clap(short, long, value_name = "FILE", default_value = DEFAULT_STORE_PATH)]
        output: PathBuf,
    },
    /// Print summary statistics of the record store, generating it first if missing
    Report {
        /// CSV record store to read
        #[clap(short, long, value_name = "FILE", default_value = DEFAULT_STORE_PATH)]
        store: PathBuf,

        /// Directory of GPX files, used only when the store must be generated
        #[clap(short, long, value_name = "DIR", default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// Print the summary as JSON
        #[clap(long, default_value = "false")]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::parse_from(["route-metrics", "report"]);
        assert_eq!(settings.unit, "meters");
        assert!(!settings.verbose);
        match settings.command {
            Command::Report { store, input, json } => {
                assert_eq!(store, PathBuf::from(DEFAULT_STORE_PATH));
                assert_eq!(input, PathBuf::from(DEFAULT_INPUT_DIR));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_generate_arguments() {
        let settings = Settings::parse_from([
            "route-metrics",
            "generate",
            "--input",
            "routes",
            "--output",
            "out.csv",
            "--unit",
            "km",
        ]);
        assert_eq!(settings.unit, "km");
        match settings.command {
            Command::Generate { input, output } => {
                assert_eq!(input, PathBuf::from("routes"));
                assert_eq!(output, PathBuf::from("out.csv"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
