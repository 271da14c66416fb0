//! Per-segment distance metrics
//!
//! The extractor measures one [`Segment`] at a time and produces an immutable
//! [`MetricRecord`]. All operations are pure; reading files and writing records is left to the
//! caller (see [`crate::pipeline`]).

use crate::{DistanceUnit, Segment, utils};

/// Metrics computed for one track segment
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricRecord {
    /// Name of the owning track, if the GPX file provides one
    pub track_name: Option<String>,
    /// 1-based segment number within the track
    pub segment: usize,
    /// Number of points in the segment
    pub points: usize,
    /// Sum of geodesic distances between consecutive points
    pub geodesic_distance: f64,
    /// Geodesic distance between the first and last point
    pub closing_distance: f64,
    /// Flat-earth path length without elevation
    pub length_2d: f64,
    /// Flat-earth path length including elevation changes
    pub length_3d: f64,
    /// `length_3d - geodesic_distance`
    pub delta: f64,
}

impl MetricRecord {
    /// Assemble a record, deriving the delta from the two compared fields
    pub fn new(
        track_name: Option<String>,
        segment: usize,
        points: usize,
        geodesic_distance: f64,
        closing_distance: f64,
        length_2d: f64,
        length_3d: f64,
    ) -> Self {
        Self {
            track_name,
            segment,
            points,
            geodesic_distance,
            closing_distance,
            length_2d,
            length_3d,
            delta: length_3d - geodesic_distance,
        }
    }
}

/// Computes distance metrics for segments in a fixed unit
#[derive(Clone, Copy, Debug, Default)]
pub struct RouteMetricsExtractor {
    unit: DistanceUnit,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl RouteMetricsExtractor {
    /// Create an extractor reporting distances in `unit`
    pub fn new(unit: DistanceUnit) -> Self {
        Self { unit }
    }

    /// Unit of every distance this extractor produces
    #[inline]
    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// Sum of geodesic distances between consecutive points, in recording order
    ///
    /// Zero for segments with fewer than two points.
    pub fn cumulative_geodesic_distance(segment: &Segment, unit: DistanceUnit) -> f64 {
        let meters: f64 = segment
            .points()
            .windows(2)
            .map(|pair| utils::geodesic_distance(&pair[0], &pair[1]))
            .sum();
        unit.from_meters(meters)
    }

    /// Geodesic distance between the first and last point
    ///
    /// Zero for segments with fewer than two points.
    pub fn closing_distance(segment: &Segment, unit: DistanceUnit) -> f64 {
        segment
            .endpoints()
            .map(|(first, last)| unit.from_meters(utils::geodesic_distance(first, last)))
            .unwrap_or(0.0)
    }

    /// Flat-earth path length in meters, ignoring elevation
    pub fn planar_length_2d(segment: &Segment) -> f64 {
        segment
            .points()
            .windows(2)
            .map(|pair| utils::planar_distance_2d(&pair[1], &pair[0]))
            .sum()
    }

    /// Flat-earth path length in meters, including per-step elevation changes
    pub fn planar_length_3d(segment: &Segment) -> f64 {
        segment
            .points()
            .windows(2)
            .map(|pair| utils::planar_distance_3d(&pair[1], &pair[0]))
            .sum()
    }

    /// Measure one segment
    ///
    /// # Arguments
    /// * `track_name` - Name of the owning track, if any
    /// * `segment_index` - 1-based position of the segment within its track
    /// * `segment` - The points to measure
    pub fn build_record(
        &self,
        track_name: Option<&str>,
        segment_index: usize,
        segment: &Segment,
    ) -> MetricRecord {
        let geodesic_distance = Self::cumulative_geodesic_distance(segment, self.unit);
        let closing_distance = Self::closing_distance(segment, self.unit);
        let length_2d = self.unit.from_meters(Self::planar_length_2d(segment));
        let length_3d = self.unit.from_meters(Self::planar_length_3d(segment));

        let record = MetricRecord::new(
            track_name.map(str::to_owned),
            segment_index,
            segment.len(),
            geodesic_distance,
            closing_distance,
            length_2d,
            length_3d,
        );
        tracing::debug!(
            "Segment {} of {:?}: {} points, geodesic {:.3} {}, delta {:.3}",
            segment_index,
            record.track_name,
            record.points,
            record.geodesic_distance,
            self.unit,
            record.delta
        );
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoPoint;

    fn create_test_segment() -> Segment {
        // A short walk around London with elevations
        Segment::new(vec![
            GeoPoint::with_elevation(51.5074, -0.1278, 10.0),
            GeoPoint::with_elevation(51.5084, -0.1268, 14.0),
            GeoPoint::with_elevation(51.5090, -0.1290, 12.0),
            GeoPoint::with_elevation(51.5070, -0.1300, 9.0),
        ])
    }

    #[test]
    fn test_degenerate_segments_are_zero() {
        let empty = Segment::default();
        let single = Segment::new(vec![GeoPoint::with_elevation(51.5, -0.1, 20.0)]);

        for segment in [&empty, &single] {
            assert_eq!(
                RouteMetricsExtractor::cumulative_geodesic_distance(segment, DistanceUnit::Meters),
                0.0
            );
            assert_eq!(
                RouteMetricsExtractor::closing_distance(segment, DistanceUnit::Meters),
                0.0
            );
            assert_eq!(RouteMetricsExtractor::planar_length_2d(segment), 0.0);
            assert_eq!(RouteMetricsExtractor::planar_length_3d(segment), 0.0);
        }
    }

    #[test]
    fn test_empty_segment_record() {
        let extractor = RouteMetricsExtractor::new(DistanceUnit::Meters);
        let record = extractor.build_record(None, 1, &Segment::default());

        assert_eq!(record.track_name, None);
        assert_eq!(record.points, 0);
        assert_eq!(record.geodesic_distance, 0.0);
        assert_eq!(record.closing_distance, 0.0);
        assert_eq!(record.delta, 0.0);
    }

    #[test]
    fn test_cumulative_sums_consecutive_steps() {
        let segment = create_test_segment();
        let points = segment.points();
        let expected: f64 = (1..points.len())
            .map(|i| utils::geodesic_distance(&points[i - 1], &points[i]))
            .sum();

        let d = RouteMetricsExtractor::cumulative_geodesic_distance(&segment, DistanceUnit::Meters);
        assert!((d - expected).abs() < 1e-9);
        assert!(d > 0.0);
    }

    #[test]
    fn test_cumulative_depends_on_order() {
        let segment = create_test_segment();
        let mut shuffled = segment.points().to_vec();
        shuffled.swap(1, 2);
        let shuffled = Segment::new(shuffled);

        let original =
            RouteMetricsExtractor::cumulative_geodesic_distance(&segment, DistanceUnit::Meters);
        let permuted =
            RouteMetricsExtractor::cumulative_geodesic_distance(&shuffled, DistanceUnit::Meters);
        assert!((original - permuted).abs() > 1.0);
    }

    #[test]
    fn test_closing_distance_is_invariant_under_reversal() {
        let segment = create_test_segment();
        let mut reversed = segment.points().to_vec();
        reversed.reverse();
        let reversed = Segment::new(reversed);

        let forward = RouteMetricsExtractor::closing_distance(&segment, DistanceUnit::Meters);
        let backward = RouteMetricsExtractor::closing_distance(&reversed, DistanceUnit::Meters);
        assert!(forward > 0.0);
        assert!((forward - backward).abs() < 1e-6);
    }

    #[test]
    fn test_closing_distance_never_exceeds_cumulative() {
        let segment = create_test_segment();
        let closing = RouteMetricsExtractor::closing_distance(&segment, DistanceUnit::Meters);
        let cumulative =
            RouteMetricsExtractor::cumulative_geodesic_distance(&segment, DistanceUnit::Meters);
        assert!(closing <= cumulative);
    }

    #[test]
    fn test_3d_length_is_at_least_2d_length() {
        let segment = create_test_segment();
        let flat = RouteMetricsExtractor::planar_length_2d(&segment);
        let climbing = RouteMetricsExtractor::planar_length_3d(&segment);
        assert!(climbing > flat);
    }

    #[test]
    fn test_delta_is_3d_minus_geodesic() {
        let extractor = RouteMetricsExtractor::new(DistanceUnit::Meters);
        let record = extractor.build_record(Some("Walk"), 2, &create_test_segment());

        assert_eq!(record.track_name.as_deref(), Some("Walk"));
        assert_eq!(record.segment, 2);
        assert_eq!(record.points, 4);
        assert_eq!(record.delta, record.length_3d - record.geodesic_distance);
        // Planar and geodesic agree to well under a percent over a few hundred meters
        assert!(record.delta.abs() < 0.01 * record.geodesic_distance + 10.0);
    }

    #[test]
    fn test_record_uses_configured_unit() {
        let segment = create_test_segment();
        let meters = RouteMetricsExtractor::new(DistanceUnit::Meters).build_record(None, 1, &segment);
        let km = RouteMetricsExtractor::new(DistanceUnit::Kilometers).build_record(None, 1, &segment);

        assert!((km.geodesic_distance * 1000.0 - meters.geodesic_distance).abs() < 1e-6);
        assert!((km.closing_distance * 1000.0 - meters.closing_distance).abs() < 1e-6);
        assert!((km.length_3d * 1000.0 - meters.length_3d).abs() < 1e-6);
        assert_eq!(km.delta, km.length_3d - km.geodesic_distance);
    }
}
