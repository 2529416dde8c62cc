//! Core value types for simulator telemetry.
//!
//! - [`PositionSample`] - One GPS fix from an `XGPS` datagram
//! - [`AttitudeSample`] - One attitude report from an `XATT` datagram
//! - [`TelemetryState`] - The receiver's latest-sample cell contents
//! - [`TelemetrySnapshot`] - Point-in-time view handed to pollers
//! - [`ReceiverStats`] - Datagram counters for diagnostics

use std::time::{Duration, Instant};

use crate::units::{METERS_TO_FEET, MPS_TO_KNOTS};

/// A single position fix reported by the simulator.
///
/// Fields are stored exactly as received: SI units for altitude and ground
/// speed, degrees for everything else. Conversions to aviation units happen
/// on read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Altitude MSL in meters.
    pub altitude: f64,
    /// Ground track in degrees.
    pub track: f64,
    /// Ground speed in meters per second.
    pub ground_speed: f64,
}

impl PositionSample {
    /// Create a position sample from raw datagram fields.
    pub fn new(
        longitude: f64,
        latitude: f64,
        altitude: f64,
        track: f64,
        ground_speed: f64,
    ) -> Self {
        Self {
            longitude,
            latitude,
            altitude,
            track,
            ground_speed,
        }
    }

    /// Altitude in feet.
    pub fn altitude_ft(&self) -> f64 {
        self.altitude * METERS_TO_FEET
    }

    /// Ground speed in knots.
    pub fn ground_speed_kts(&self) -> f64 {
        self.ground_speed * MPS_TO_KNOTS
    }

    /// Position as `(latitude, longitude)`.
    pub fn lat_lon(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// True when every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && self.altitude.is_finite()
            && self.track.is_finite()
            && self.ground_speed.is_finite()
    }
}

/// Aircraft attitude reported by the simulator, all in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttitudeSample {
    pub true_heading: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl AttitudeSample {
    pub fn new(true_heading: f64, pitch: f64, roll: f64) -> Self {
        Self {
            true_heading,
            pitch,
            roll,
        }
    }
}

/// Latest-sample state owned by the receiver.
///
/// The receive loop never mutates a published value in place; it builds a
/// new `TelemetryState` and replaces the old one as a whole, so readers see
/// either the previous or the next complete value.
#[derive(Debug, Clone, Default)]
pub struct TelemetryState {
    pub position: Option<PositionSample>,
    pub attitude: Option<AttitudeSample>,
    /// Number of position samples accepted so far.
    pub position_seq: u64,
    /// When the last valid datagram (of either kind) arrived.
    pub last_receive: Option<Instant>,
}

impl TelemetryState {
    /// Return a copy with `position` replaced.
    pub fn with_position(&self, position: PositionSample, received_at: Instant) -> Self {
        Self {
            position: Some(position),
            attitude: self.attitude,
            position_seq: self.position_seq + 1,
            last_receive: Some(received_at),
        }
    }

    /// Return a copy with `attitude` replaced.
    pub fn with_attitude(&self, attitude: AttitudeSample, received_at: Instant) -> Self {
        Self {
            position: self.position,
            attitude: Some(attitude),
            position_seq: self.position_seq,
            last_receive: Some(received_at),
        }
    }

    /// Build a snapshot as seen at `now`.
    pub fn snapshot_at(&self, now: Instant, receive_timeout: Duration) -> TelemetrySnapshot {
        let last_receive_age = self
            .last_receive
            .map(|t| now.saturating_duration_since(t));
        let connected = last_receive_age.is_some_and(|age| age < receive_timeout);

        TelemetrySnapshot {
            position: self.position,
            attitude: self.attitude,
            connected,
            position_seq: self.position_seq,
            last_receive_age,
        }
    }
}

/// Read-only, point-in-time view of the receiver state.
#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    /// Latest position fix, if any was ever received.
    pub position: Option<PositionSample>,
    /// Latest attitude, if any was ever received.
    pub attitude: Option<AttitudeSample>,
    /// A datagram arrived within the staleness threshold.
    pub connected: bool,
    /// Sequence number of `position`; increases by one per accepted fix.
    pub position_seq: u64,
    /// Time since the last valid datagram.
    pub last_receive_age: Option<Duration>,
}

impl TelemetrySnapshot {
    /// Both a position and an attitude are available.
    pub fn is_complete(&self) -> bool {
        self.position.is_some() && self.attitude.is_some()
    }
}

/// Datagram counters kept by the receive loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiverStats {
    pub datagrams_received: u64,
    pub positions_accepted: u64,
    pub attitudes_accepted: u64,
    pub datagrams_rejected: u64,
}
