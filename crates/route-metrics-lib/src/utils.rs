//! Distance primitives between two coordinates

use crate::GeoPoint;
use geo::{Distance, Geodesic};

/// Equatorial Earth radius in meters used by the planar approximation (WGS84 semi-major axis)
pub const EARTH_RADIUS_M: f64 = 6378137.0;

/// Length of one degree of arc on the equator, in meters
pub const ONE_DEGREE_M: f64 = 2.0 * std::f64::consts::PI * EARTH_RADIUS_M / 360.0;

/// Beyond this latitude or longitude difference (degrees) the planar step falls back to haversine
pub const PLANAR_MAX_DEGREES: f64 = 0.2;

/// Geodesic distance on the WGS84 ellipsoid between two points in meters
///
/// Elevation is ignored.
#[inline]
pub fn geodesic_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    Geodesic.distance(p1.to_geo(), p2.to_geo())
}

/// Calculate the Haversine distance between two points in meters
#[inline]
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let delta_lat = (p1.latitude - p2.latitude).to_radians();
    let delta_lon = (p1.longitude - p2.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Flat-earth distance between two points in meters, ignoring elevation
///
/// The longitude difference is scaled by the cosine of `current`'s latitude. Points further
/// apart than [`PLANAR_MAX_DEGREES`] in either axis use [`haversine_distance`] instead.
#[inline]
pub fn planar_distance_2d(current: &GeoPoint, previous: &GeoPoint) -> f64 {
    if exceeds_planar_range(current, previous) {
        return haversine_distance(current, previous);
    }

    let coef = current.latitude.to_radians().cos();
    let x = current.latitude - previous.latitude;
    let y = (current.longitude - previous.longitude) * coef;
    (x * x + y * y).sqrt() * ONE_DEGREE_M
}

/// Flat-earth distance combined with the elevation change between the two points
///
/// Falls back to the 2D distance when either elevation is missing. Steps beyond
/// [`PLANAR_MAX_DEGREES`] are plain [`haversine_distance`] with no elevation term.
#[inline]
pub fn planar_distance_3d(current: &GeoPoint, previous: &GeoPoint) -> f64 {
    if exceeds_planar_range(current, previous) {
        return haversine_distance(current, previous);
    }
    let distance_2d = planar_distance_2d(current, previous);
    match (current.elevation, previous.elevation) {
        (Some(e1), Some(e2)) if e1 != e2 => distance_2d.hypot(e1 - e2),
        _ => distance_2d,
    }
}

#[inline]
fn exceeds_planar_range(current: &GeoPoint, previous: &GeoPoint) -> bool {
    (current.latitude - previous.latitude).abs() > PLANAR_MAX_DEGREES
        || (current.longitude - previous.longitude).abs() > PLANAR_MAX_DEGREES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geodesic_one_degree_of_longitude_at_equator() {
        let d = geodesic_distance(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(0.0, 1.0));
        // One degree along the WGS84 equator is a * pi / 180
        assert!((d - 111319.49079327357).abs() < 1e-3);
    }

    #[test]
    fn test_geodesic_ignores_elevation() {
        let a = GeoPoint::new(51.5074, -0.1278);
        let b = GeoPoint::new(51.5078, -0.1274);
        let high_b = GeoPoint::with_elevation(51.5078, -0.1274, 1000.0);
        assert_eq!(geodesic_distance(&a, &b), geodesic_distance(&a, &high_b));
    }

    #[test]
    fn test_geodesic_is_symmetric() {
        let a = GeoPoint::new(48.8566, 2.3522);
        let b = GeoPoint::new(52.5200, 13.4050);
        assert!((geodesic_distance(&a, &b) - geodesic_distance(&b, &a)).abs() < 1e-6);
    }

    #[test]
    fn test_planar_along_meridian() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(10.1, 20.0);
        let d = planar_distance_2d(&b, &a);
        assert!((d - 0.1 * ONE_DEGREE_M).abs() < 1e-6);
    }

    #[test]
    fn test_planar_scales_longitude_by_current_latitude() {
        let a = GeoPoint::new(60.0, 0.0);
        let b = GeoPoint::new(60.0, 0.1);
        let d = planar_distance_2d(&b, &a);
        let expected = 0.1 * 60f64.to_radians().cos() * ONE_DEGREE_M;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn test_planar_falls_back_to_haversine_for_long_steps() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        assert_eq!(planar_distance_2d(&b, &a), haversine_distance(&b, &a));
        assert!((haversine_distance(&a, &b) - ONE_DEGREE_M).abs() < 1e-6);
    }

    #[test]
    fn test_planar_3d_adds_elevation() {
        let a = GeoPoint::with_elevation(10.0, 20.0, 100.0);
        let b = GeoPoint::with_elevation(10.001, 20.0, 130.0);
        let flat = planar_distance_2d(&b, &a);
        let d = planar_distance_3d(&b, &a);
        assert!((d - (flat * flat + 900.0).sqrt()).abs() < 1e-9);
        assert!(d > flat);
    }

    #[test]
    fn test_planar_3d_long_step_ignores_elevation() {
        let a = GeoPoint::with_elevation(0.0, 0.0, 0.0);
        let b = GeoPoint::with_elevation(0.0, 1.0, 1000.0);
        let d = planar_distance_3d(&b, &a);
        assert_eq!(d, haversine_distance(&b, &a));
        assert_eq!(d, planar_distance_2d(&b, &a));
        assert!((d - 111319.4908).abs() < 1e-3);
    }

    #[test]
    fn test_planar_3d_without_elevation_matches_2d() {
        let a = GeoPoint::with_elevation(10.0, 20.0, 100.0);
        let b = GeoPoint::new(10.001, 20.0);
        assert_eq!(planar_distance_3d(&b, &a), planar_distance_2d(&b, &a));
    }
}
