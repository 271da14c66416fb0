//! Summary statistics over stored records
//!
//! Nothing here skips or repairs records: an empty or too-small input is an error, since a
//! silently shrunken sample would bias every aggregate.

use crate::{DistanceUnit, MetricRecord, MetricsError, Result};
use std::fmt;

/// Min, mean, max and sample standard deviation of the delta column
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeltaStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub stddev: f64,
}

/// Arithmetic mean of the cumulative geodesic distance of all records
pub fn mean_distance(records: &[MetricRecord]) -> Result<f64> {
    mean(records.iter().map(|r| r.geodesic_distance), "mean distance")
}

/// Statistics over the delta column of all records
///
/// Fails with [`MetricsError::EmptyInput`] for no records and
/// [`MetricsError::InsufficientData`] for a single one.
pub fn delta_stats(records: &[MetricRecord]) -> Result<DeltaStats> {
    let deltas: Vec<f64> = records.iter().map(|r| r.delta).collect();

    let mean = mean(deltas.iter().copied(), "delta statistics")?;
    let min = deltas.iter().copied().fold(f64::INFINITY, f64::min);
    let max = deltas.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let stddev = sample_stddev(&deltas, mean)?;

    Ok(DeltaStats {
        min,
        mean,
        max,
        stddev,
    })
}

fn mean(values: impl ExactSizeIterator<Item = f64>, what: &'static str) -> Result<f64> {
    let count = values.len();
    if count == 0 {
        return Err(MetricsError::EmptyInput(what));
    }
    Ok(values.sum::<f64>() / count as f64)
}

fn sample_stddev(values: &[f64], mean: f64) -> Result<f64> {
    if values.len() < 2 {
        return Err(MetricsError::InsufficientData {
            what: "delta standard deviation",
            count: values.len(),
        });
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Everything printed by a report run
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSummary {
    /// Number of records the summary was computed from
    pub records: usize,
    /// Unit the store was generated in
    ///
    /// The store itself does not record its unit; this is the unit of the reporting run's
    /// configuration, which must match the one used to generate the store.
    pub unit: DistanceUnit,
    pub mean_distance: f64,
    pub delta: DeltaStats,
}

impl StatsSummary {
    pub fn from_records(records: &[MetricRecord], unit: DistanceUnit) -> Result<Self> {
        Ok(Self {
            records: records.len(),
            unit,
            mean_distance: mean_distance(records)?,
            delta: delta_stats(records)?,
        })
    }
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit;
        writeln!(f, "Records: {}", self.records)?;
        writeln!(f, "Mean GeoPy distance: {} {unit}", self.mean_distance)?;
        writeln!(f, "Mean GPX 3d - GeoPy: {} {unit}", self.delta.mean)?;
        writeln!(f, "Min GPX 3d - GeoPy: {} {unit}", self.delta.min)?;
        writeln!(f, "Max GPX 3d - GeoPy: {} {unit}", self.delta.max)?;
        write!(f, "Std dev GPX 3d - GeoPy: {} {unit}", self.delta.stddev)
    }
}
