//! Track storage converted from parsed GPX data
//!
//! The GPX parser hands out waypoints carrying much more than a position. This module keeps
//! only what the distance metrics need, preserving recording order exactly.

/// A geographic coordinate with optional elevation in meters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Elevation in meters, if recorded
    pub elevation: Option<f64>,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
        }
    }

    /// Position as a `geo` point (x = longitude, y = latitude)
    #[inline]
    pub fn to_geo(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

impl From<&gpx::Waypoint> for GeoPoint {
    fn from(waypoint: &gpx::Waypoint) -> Self {
        let point = waypoint.point();
        Self {
            latitude: point.y(),
            longitude: point.x(),
            elevation: waypoint.elevation,
        }
    }
}

/// One contiguous recorded leg of a track
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Segment {
    points: Vec<GeoPoint>,
}

impl Segment {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Points in recording order
    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last point, if the segment has at least two points
    pub fn endpoints(&self) -> Option<(&GeoPoint, &GeoPoint)> {
        match self.points.as_slice() {
            [first, .., last] => Some((first, last)),
            _ => None,
        }
    }
}

impl From<&gpx::TrackSegment> for Segment {
    fn from(segment: &gpx::TrackSegment) -> Self {
        Self::new(segment.points.iter().map(GeoPoint::from).collect())
    }
}

/// A named grouping of segments
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    pub name: Option<String>,
    pub segments: Vec<Segment>,
}

impl Track {
    pub fn new(name: Option<String>, segments: Vec<Segment>) -> Self {
        Self { name, segments }
    }

    /// Convert every track of a parsed GPX document, keeping document order
    pub fn from_gpx(gpx_data: &gpx::Gpx) -> Vec<Track> {
        gpx_data.tracks.iter().map(Track::from).collect()
    }

    /// Total number of points across all segments
    pub fn total_points(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }
}

impl From<&gpx::Track> for Track {
    fn from(track: &gpx::Track) -> Self {
        Self {
            name: track.name.clone(),
            segments: track.segments.iter().map(Segment::from).collect(),
        }
    }
}
