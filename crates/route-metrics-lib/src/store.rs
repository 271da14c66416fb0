//! CSV record store
//!
//! Records are written one row per segment under a fixed eight-column header. Absent values
//! are rendered as [`MISSING_VALUE`] here and nowhere else. Reading parses every numeric
//! column strictly: a row that does not parse, or holds a non-finite distance, aborts the read.
//!
//! A new store is staged in a temporary file next to its final path and only moved into place
//! once every row has been written, so a failed run never leaves a partial store behind.

use crate::{MetricRecord, MetricsError, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Column names of the record store, in order
pub const COLUMNS: [&str; 8] = [
    "Track name",
    "Segment",
    "Points",
    "GeoPy distance",
    "GeoPy closing distance",
    "GPX 2d distance",
    "GPX 3d distance",
    "GPX 3d - GeoPy",
];

/// Placeholder written for values that are absent
pub const MISSING_VALUE: &str = "??";

/// Appends [`MetricRecord`]s to a CSV sink
pub struct RecordWriter<W: Write> {
    writer: csv::Writer<W>,
    written: usize,
}

impl RecordWriter<NamedTempFile> {
    /// Stage a new store in the directory of `path` and write the header
    ///
    /// Nothing appears at `path` until [`RecordWriter::commit`]. Dropping the writer instead
    /// deletes the staged file.
    pub fn staged(path: &Path) -> Result<Self> {
        let parent = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        Self::new(NamedTempFile::new_in(parent)?)
    }

    /// Flush the staged rows and move them to `path`, replacing any previous store
    pub fn commit(self, path: &Path) -> Result<usize> {
        let written = self.written;
        let staged = self.finish()?;
        staged.persist(path).map_err(|e| MetricsError::Io(e.error))?;
        Ok(written)
    }
}

impl<W: Write> RecordWriter<W> {
    /// Wrap a sink and write the header row
    pub fn new(sink: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(sink);
        writer.write_record(COLUMNS)?;
        Ok(Self { writer, written: 0 })
    }

    /// Append one record
    pub fn append(&mut self, record: &MetricRecord) -> Result<()> {
        let track_name = record.track_name.as_deref().unwrap_or(MISSING_VALUE);
        self.writer.write_record([
            track_name.to_string(),
            record.segment.to_string(),
            record.points.to_string(),
            record.geodesic_distance.to_string(),
            record.closing_distance.to_string(),
            record.length_2d.to_string(),
            record.length_3d.to_string(),
            record.delta.to_string(),
        ])?;
        self.written += 1;
        Ok(())
    }

    /// Number of records appended so far
    #[inline]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered rows and hand back the sink
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        self.writer.into_inner().map_err(|e| {
            MetricsError::Io(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })
    }
}

/// Read every record of the store at `path`
pub fn read_records(path: &Path) -> Result<Vec<MetricRecord>> {
    let file = File::open(path)?;
    read_records_from(file)
}

/// Read every record from a CSV source, validating the header first
///
/// Row numbers in errors are 1-based and count data rows only.
pub fn read_records_from<R: Read>(source: R) -> Result<Vec<MetricRecord>> {
    let mut reader = csv::Reader::from_reader(source);

    let headers = reader.headers()?;
    if !headers.iter().eq(COLUMNS.iter().copied()) {
        return Err(MetricsError::StoreHeader(
            headers.iter().collect::<Vec<_>>().join(","),
        ));
    }

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        records.push(parse_row(i + 1, &row)?);
    }
    Ok(records)
}

fn parse_row(row_number: usize, row: &csv::StringRecord) -> Result<MetricRecord> {
    let field = |index: usize| row.get(index).unwrap_or(MISSING_VALUE);

    let track_name = match field(0) {
        MISSING_VALUE => None,
        name => Some(name.to_string()),
    };

    Ok(MetricRecord {
        track_name,
        segment: parse_field(row_number, 1, field(1))?,
        points: parse_field(row_number, 2, field(2))?,
        geodesic_distance: parse_distance(row_number, 3, field(3))?,
        closing_distance: parse_distance(row_number, 4, field(4))?,
        length_2d: parse_distance(row_number, 5, field(5))?,
        length_3d: parse_distance(row_number, 6, field(6))?,
        delta: parse_distance(row_number, 7, field(7))?,
    })
}

fn parse_field<T: std::str::FromStr>(row: usize, column: usize, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| integrity_error(row, column, value))
}

/// Distances must be finite: NaN or infinity would poison every aggregate
fn parse_distance(row: usize, column: usize, value: &str) -> Result<f64> {
    let parsed: f64 = parse_field(row, column, value)?;
    if !parsed.is_finite() {
        return Err(integrity_error(row, column, value));
    }
    Ok(parsed)
}

fn integrity_error(row: usize, column: usize, value: &str) -> MetricsError {
    MetricsError::DataIntegrity {
        row,
        column: COLUMNS[column],
        value: value.to_string(),
    }
}
