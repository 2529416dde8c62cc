//! Distance calculations between geographic positions.
//!
//! Positions are `(latitude, longitude)` pairs in degrees. Great-circle
//! distances are in nautical miles on a spherical earth.

use std::f64::consts::PI;

/// Earth's radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = PI / 180.0;

/// Calculate the great-circle distance between two positions.
///
/// Uses the haversine formula, which stays well conditioned for short
/// hops and near the poles.
///
/// # Arguments
///
/// * `from` - First position as (latitude, longitude) in degrees
/// * `to` - Second position as (latitude, longitude) in degrees
///
/// # Returns
///
/// Distance in nautical miles.
///
/// # Example
///
/// ```
/// use skytrack::geo::haversine_distance_nm;
///
/// // One degree of latitude is about 60nm
/// let dist = haversine_distance_nm((0.0, 0.0), (1.0, 0.0));
/// assert!((dist - 60.0).abs() < 0.1);
/// ```
pub fn haversine_distance_nm(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let lat1_rad = lat1 * DEG_TO_RAD;
    let lat2_rad = lat2 * DEG_TO_RAD;
    let delta_lat = (lat2 - lat1) * DEG_TO_RAD;
    let delta_lon = (lon2 - lon1) * DEG_TO_RAD;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_NM * c
}

/// Flat distance in degrees between two positions.
///
/// Treats latitude and longitude as Cartesian axes. Only suitable for
/// spacing decisions where geodetic accuracy does not matter.
pub fn planar_distance_deg(from: (f64, f64), to: (f64, f64)) -> f64 {
    let d_lat = to.0 - from.0;
    let d_lon = to.1 - from.1;
    (d_lat * d_lat + d_lon * d_lon).sqrt()
}
