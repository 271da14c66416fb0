//! Directory-level runs
//!
//! `generate` turns a directory of GPX files into the CSV record store, `report` reduces
//! the store into a [`StatsSummary`]. Files are visited in sorted path order and processed one
//! at a time; each file handle is dropped before the next one is opened.

use crate::{
    Config, MetricsError, RecordWriter, Result, RouteMetricsExtractor, StatsSummary, Track,
    read_records,
};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What a generate run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerateReport {
    /// GPX files parsed
    pub files: usize,
    /// Tracks found across all files
    pub tracks: usize,
    /// Records written (one per segment)
    pub records: usize,
}

/// List the GPX files of `dir` in sorted order
///
/// Fails with [`MetricsError::InputPath`] if `dir` is not a directory. Entries that are not
/// regular files with a `gpx` extension are skipped.
pub fn gpx_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(MetricsError::InputPath(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_gpx = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"));
        if path.is_file() && is_gpx {
            paths.push(path);
        } else {
            tracing::warn!("Skipping non-GPX entry: {}", path.display());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Parse one GPX file into tracks
pub fn load_tracks(path: &Path) -> Result<Vec<Track>> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let gpx_data = gpx::read(reader).map_err(|source| MetricsError::GpxParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Track::from_gpx(&gpx_data))
}

/// Measure every segment of `tracks` and append the records, numbering segments per track
pub fn append_tracks<W: Write>(
    extractor: &RouteMetricsExtractor,
    tracks: &[Track],
    writer: &mut RecordWriter<W>,
) -> Result<usize> {
    let mut appended = 0;
    for track in tracks {
        for (segment_index, segment) in track.segments.iter().enumerate() {
            let record = extractor.build_record(track.name.as_deref(), segment_index + 1, segment);
            writer.append(&record)?;
            appended += 1;
        }
    }
    Ok(appended)
}

/// Build the record store from every GPX file of the configured input directory
///
/// Rows are staged next to the store and moved into place only after the last file has been
/// processed. On error the previous store, if any, is left untouched.
pub fn generate(config: &Config) -> Result<GenerateReport> {
    #[cfg(feature = "profiling")]
    profiling::scope!("pipeline::generate");
    let start = Instant::now();

    let paths = gpx_files(&config.input_dir)?;
    let extractor = RouteMetricsExtractor::new(config.unit);
    tracing::info!(
        "Measuring {} GPX files in {}",
        paths.len(),
        extractor.unit()
    );
    let mut writer = RecordWriter::staged(&config.store_path)?;
    let mut report = GenerateReport::default();

    for path in &paths {
        let tracks = load_tracks(path)?;
        let appended = append_tracks(&extractor, &tracks, &mut writer)?;
        tracing::info!(
            "Processed {}: {} tracks, {} segments, {} points",
            path.display(),
            tracks.len(),
            appended,
            tracks.iter().map(Track::total_points).sum::<usize>()
        );
        report.files += 1;
        report.tracks += tracks.len();
    }
    report.records = writer.written();
    writer.commit(&config.store_path)?;

    tracing::info!(
        "Wrote {} records from {} files to {} in {:?}",
        report.records,
        report.files,
        config.store_path.display(),
        start.elapsed()
    );
    Ok(report)
}

/// Summarize the record store, generating it first if it does not exist yet
pub fn report(config: &Config) -> Result<StatsSummary> {
    #[cfg(feature = "profiling")]
    profiling::scope!("pipeline::report");
    let start = Instant::now();

    if !config.store_path.exists() {
        tracing::info!(
            "Record store {} not found, generating it first",
            config.store_path.display()
        );
        generate(config)?;
    }

    let records = read_records(&config.store_path)?;
    let summary = StatsSummary::from_records(&records, config.unit)?;
    tracing::info!(
        "Summarized {} records from {} in {:?}",
        records.len(),
        config.store_path.display(),
        start.elapsed()
    );
    Ok(summary)
}
