//! Linear distance units accepted for a run

use crate::MetricsError;
use std::fmt;
use std::str::FromStr;

const METERS_PER_KILOMETER: f64 = 1000.0;
const KILOMETERS_PER_MILE: f64 = 1.609344;
const FEET_PER_MILE: f64 = 5280.0;
const KILOMETERS_PER_NAUTICAL_MILE: f64 = 1.852;

/// A single linear unit shared by every distance of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceUnit {
    #[default]
    Meters,
    Kilometers,
    Miles,
    Feet,
    Nautical,
}

impl DistanceUnit {
    /// All supported units, in display order
    pub const ALL: [DistanceUnit; 5] = [
        DistanceUnit::Meters,
        DistanceUnit::Kilometers,
        DistanceUnit::Miles,
        DistanceUnit::Feet,
        DistanceUnit::Nautical,
    ];

    /// Comma-separated long names of every supported unit
    pub fn supported_names() -> String {
        Self::ALL.map(DistanceUnit::name).join(", ")
    }

    /// Canonical long name of the unit
    pub fn name(self) -> &'static str {
        match self {
            DistanceUnit::Meters => "meters",
            DistanceUnit::Kilometers => "kilometers",
            DistanceUnit::Miles => "miles",
            DistanceUnit::Feet => "feet",
            DistanceUnit::Nautical => "nautical",
        }
    }

    /// Convert a distance in meters into this unit
    #[inline]
    pub fn from_meters(self, meters: f64) -> f64 {
        let kilometers = meters / METERS_PER_KILOMETER;
        match self {
            DistanceUnit::Meters => meters,
            DistanceUnit::Kilometers => kilometers,
            DistanceUnit::Miles => kilometers / KILOMETERS_PER_MILE,
            DistanceUnit::Feet => kilometers / KILOMETERS_PER_MILE * FEET_PER_MILE,
            DistanceUnit::Nautical => kilometers / KILOMETERS_PER_NAUTICAL_MILE,
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meters" | "m" => Ok(DistanceUnit::Meters),
            "kilometers" | "km" => Ok(DistanceUnit::Kilometers),
            "miles" | "mi" => Ok(DistanceUnit::Miles),
            "feet" | "ft" => Ok(DistanceUnit::Feet),
            "nautical" | "nm" => Ok(DistanceUnit::Nautical),
            other => Err(MetricsError::UnsupportedUnit(other.to_string())),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
