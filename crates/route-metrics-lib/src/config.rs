//! Run configuration

use crate::{DistanceUnit, Result};
use std::path::PathBuf;

/// Default directory of GPX files (an Apple Health export)
pub const DEFAULT_INPUT_DIR: &str = "./apple_health_export/workout-routes";

/// Default path of the CSV record store
pub const DEFAULT_STORE_PATH: &str = "routes_data.csv";

/// Configuration shared by the generate and report runs
///
/// The unit is validated when the configuration is built, so a run with an unknown unit
/// fails before any file is touched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Unit of every distance written to the store
    pub unit: DistanceUnit,
    /// Directory holding the GPX files
    pub input_dir: PathBuf,
    /// CSV record store
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit: DistanceUnit::default(),
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl Config {
    /// Build a configuration from a unit name, validating it
    pub fn new(
        unit_name: &str,
        input_dir: impl Into<PathBuf>,
        store_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            unit: unit_name.parse()?,
            input_dir: input_dir.into(),
            store_path: store_path.into(),
        })
    }
}
