//! Breadcrumb trail of visited positions.
//!
//! A point is appended only when it lies more than `min_spacing` degrees
//! (flat lat/lon distance) from the previously recorded point, so a
//! parked aircraft does not grow the trail.

use crate::geo::planar_distance_deg;
use crate::telemetry::PositionSample;

/// Default minimum spacing between trail points, in degrees.
pub const DEFAULT_TRAIL_SPACING_DEG: f64 = 0.0005;

/// Ordered list of `(latitude, longitude)` points along the flight.
#[derive(Debug, Clone)]
pub struct FlightPath {
    points: Vec<(f64, f64)>,
    min_spacing_deg: f64,
}

impl Default for FlightPath {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_SPACING_DEG)
    }
}

impl FlightPath {
    pub fn new(min_spacing_deg: f64) -> Self {
        Self {
            points: Vec::new(),
            min_spacing_deg,
        }
    }

    /// Offer a fix to the trail. Returns true if it was appended.
    pub fn record(&mut self, position: &PositionSample) -> bool {
        let point = position.lat_lon();
        if let Some(&last) = self.points.last() {
            if planar_distance_deg(last, point) <= self.min_spacing_deg {
                return false;
            }
        }
        self.points.push(point);
        true
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min_spacing_deg(&self) -> f64 {
        self.min_spacing_deg
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
