//! Route Metrics Library - Distance Comparison for GPX Track Collections
//!
//! This library walks parsed GPX tracks segment by segment and measures each segment in two
//! independent ways: geodesic distances on the WGS84 ellipsoid, and the flat-earth path lengths
//! used by common GPX toolkits. The per-segment results are persisted as CSV rows and later
//! reduced into summary statistics describing how far the two methods diverge.
//!
//! # Architecture
//!
//! - **[`Track`]** / **[`Segment`]** / **[`GeoPoint`]**: Owned point data converted from GPX
//! - **[`RouteMetricsExtractor`]**: Computes one [`MetricRecord`] per segment
//! - **[`RecordWriter`]** / [`read_records`]: The CSV record store
//! - **[`StatsSummary`]**: Aggregate statistics over the stored records
//! - **[`pipeline`]**: Directory-level `generate` and `report` runs
//!
//! # Units
//!
//! All distances of a run share one [`DistanceUnit`], validated once when the [`Config`] is
//! built. Planar lengths are computed in meters and converted to that unit so the delta column
//! compares like with like.

pub mod config;
mod extractor;
pub mod pipeline;
mod stats;
mod store;
mod track;
mod units;
pub mod utils;

// Public API exports
pub use config::Config;
pub use extractor::{MetricRecord, RouteMetricsExtractor};
pub use pipeline::{GenerateReport, generate, report};
pub use stats::{DeltaStats, StatsSummary, delta_stats, mean_distance};
pub use store::{COLUMNS, MISSING_VALUE, RecordWriter, read_records, read_records_from};
pub use track::{GeoPoint, Segment, Track};
pub use units::DistanceUnit;

use std::path::PathBuf;

/// Error types for the route metrics library
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error(
        "Unknown distance units: {0} (supported: {supported})",
        supported = DistanceUnit::supported_names()
    )]
    UnsupportedUnit(String),

    #[error("Data path does not point to a directory: {}", .0.display())]
    InputPath(PathBuf),

    #[error("Record {row}: column {column:?} holds unparseable value {value:?}")]
    DataIntegrity {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Unexpected record store header: {0}")]
    StoreHeader(String),

    #[error("Cannot compute {0} of an empty record set")]
    EmptyInput(&'static str),

    #[error("Need at least 2 records to compute {what}, got {count}")]
    InsufficientData { what: &'static str, count: usize },

    #[error("GPX parsing error in {}: {source}", path.display())]
    GpxParse {
        path: PathBuf,
        #[source]
        source: gpx::errors::GpxError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
