//! Flight Tracker - the poll-side facade over statistics and trail.
//!
//! Owns a [`StatisticsAccumulator`], a [`FlightPath`] and the display
//! [`UnitSystem`]. The presenter feeds it from receiver snapshots and reads
//! back unit-converted [`StatisticsReport`]s.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::path::{FlightPath, DEFAULT_TRAIL_SPACING_DEG};
use super::statistics::{FlightPhase, StatisticsAccumulator, StatisticsConfig};
use crate::telemetry::{PositionSample, TelemetrySnapshot};
use crate::units::{format_hms, UnitSystem};

/// Flight tracker configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightTrackerConfig {
    pub statistics: StatisticsConfig,

    /// Minimum trail spacing in degrees.
    pub trail_spacing_deg: f64,

    pub units: UnitSystem,
}

impl Default for FlightTrackerConfig {
    fn default() -> Self {
        Self {
            statistics: StatisticsConfig::default(),
            trail_spacing_deg: DEFAULT_TRAIL_SPACING_DEG,
            units: UnitSystem::default(),
        }
    }
}

/// Flight statistics converted to a display unit system.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    /// Elapsed flight time, `None` before the aircraft started moving.
    pub flight_duration: Option<Duration>,
    /// Wall-clock flight start.
    pub started_at: Option<DateTime<Utc>>,
    pub distance: f64,
    pub avg_speed: f64,
    pub max_speed: f64,
    pub max_altitude: f64,
    /// Flight start position as `(latitude, longitude)`.
    pub start_position: Option<(f64, f64)>,
    /// Number of points on the trail.
    pub point_count: usize,
    pub units: UnitSystem,
}

impl StatisticsReport {
    /// Elapsed flight time as `HH:MM:SS`, or `--:--:--` before start.
    pub fn formatted_duration(&self) -> String {
        self.flight_duration
            .map(format_hms)
            .unwrap_or_else(|| "--:--:--".to_string())
    }
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.units;
        writeln!(f, "{:<15}{:>10}", "Flight Time:", self.formatted_duration())?;
        writeln!(
            f,
            "{:<15}{:>10.1} {}",
            "Distance:",
            self.distance,
            units.distance_unit()
        )?;
        writeln!(
            f,
            "{:<15}{:>10.1} {}",
            "Avg Speed:",
            self.avg_speed,
            units.speed_unit()
        )?;
        writeln!(
            f,
            "{:<15}{:>10.1} {}",
            "Max Speed:",
            self.max_speed,
            units.speed_unit()
        )?;
        writeln!(
            f,
            "{:<15}{:>10.0} {}",
            "Max Altitude:",
            self.max_altitude,
            units.altitude_unit()
        )?;
        match self.start_position {
            Some((lat, lon)) => writeln!(f, "{:<15}{:.4}°, {:.4}°", "Start:", lat, lon)?,
            None => writeln!(f, "{:<15}{:>10}", "Start:", "-")?,
        }
        write!(f, "{:<15}{:>10}", "Trail Points:", self.point_count)
    }
}

/// Combines the statistics accumulator, the trail and the unit setting.
#[derive(Debug, Clone)]
pub struct FlightTracker {
    accumulator: StatisticsAccumulator,
    path: FlightPath,
    units: UnitSystem,
    last_position_seq: u64,
}

impl Default for FlightTracker {
    fn default() -> Self {
        Self::new(FlightTrackerConfig::default())
    }
}

impl FlightTracker {
    pub fn new(config: FlightTrackerConfig) -> Self {
        Self {
            accumulator: StatisticsAccumulator::new(config.statistics),
            path: FlightPath::new(config.trail_spacing_deg),
            units: config.units,
            last_position_seq: 0,
        }
    }

    /// Feed one new fix into the accumulator and the trail.
    pub fn update(&mut self, position: &PositionSample) {
        self.accumulator.update(position);
        self.path.record(position);
    }

    /// Feed the snapshot's position if it is newer than the last one seen.
    ///
    /// Polling faster than the simulator broadcasts would otherwise count
    /// the same fix several times. Returns true if a fix was consumed.
    pub fn ingest(&mut self, snapshot: &TelemetrySnapshot) -> bool {
        let Some(position) = snapshot.position else {
            return false;
        };
        if snapshot.position_seq <= self.last_position_seq {
            return false;
        }
        self.last_position_seq = snapshot.position_seq;
        self.update(&position);
        true
    }

    /// Current statistics in the selected unit system.
    pub fn get_statistics(&self) -> StatisticsReport {
        let stats = self.accumulator.statistics();
        let units = self.units;
        let start = stats.start();

        StatisticsReport {
            flight_duration: self.accumulator.elapsed(),
            started_at: start.map(|s| s.wall_clock),
            distance: units.distance(stats.distance_nm()),
            avg_speed: units.speed(stats.average_speed_kts()),
            max_speed: units.speed(stats.max_speed_kts()),
            max_altitude: units.altitude(stats.max_altitude_ft()),
            start_position: start.map(|s| s.position.lat_lon()),
            point_count: self.path.len(),
            units,
        }
    }

    /// Clear all derived statistics. The trail is kept.
    pub fn reset_statistics(&mut self) {
        self.accumulator.reset();
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
        tracing::debug!("Flight path cleared");
    }

    pub fn set_unit_system(&mut self, units: UnitSystem) {
        if self.units != units {
            tracing::debug!(units = %units, "Unit system changed");
        }
        self.units = units;
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.units
    }

    pub fn path(&self) -> &FlightPath {
        &self.path
    }

    pub fn phase(&self) -> FlightPhase {
        self.accumulator.phase()
    }

    pub fn accumulator(&self) -> &StatisticsAccumulator {
        &self.accumulator
    }
}
