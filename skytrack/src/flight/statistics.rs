//! Statistics Accumulator - derived flight metrics from successive fixes.
//!
//! The accumulator is a two-state machine:
//!
//! - **Idle** - no flight start recorded yet
//! - **Active** - the first fix faster than the motion threshold fixed the
//!   flight start time and position
//!
//! Only [`StatisticsAccumulator::reset`] returns it to Idle. Every fix,
//! in either state, updates the maxima, the rolling speed window and the
//! cumulative great-circle distance.
//!
//! All stored values use aviation units: feet, knots, nautical miles.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::geo::haversine_distance_nm;
use crate::telemetry::PositionSample;
use crate::units::format_hms;

/// Ground speed (knots) above which the aircraft counts as moving.
pub const DEFAULT_MOTION_THRESHOLD_KTS: f64 = 5.0;

/// Capacity of the rolling speed window.
pub const DEFAULT_SPEED_WINDOW: usize = 100;

/// Largest speed window accepted from configuration.
pub const MAX_SPEED_WINDOW: usize = 10_000;

/// Accumulator tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsConfig {
    /// Ground speed in knots that starts the flight clock.
    pub motion_threshold_kts: f64,

    /// Number of recent speed samples kept for the average.
    pub speed_window: usize,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            motion_threshold_kts: DEFAULT_MOTION_THRESHOLD_KTS,
            speed_window: DEFAULT_SPEED_WINDOW,
        }
    }
}

/// Accumulator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    Idle,
    Active,
}

/// Where and when the flight clock started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightStart {
    /// Monotonic start time, used for elapsed time.
    pub instant: Instant,
    /// Wall-clock start time, for display.
    pub wall_clock: DateTime<Utc>,
    /// First fix above the motion threshold.
    pub position: PositionSample,
}

/// Running flight metrics.
///
/// Read-only from outside this module; only the accumulator mutates it.
#[derive(Debug, Clone, Default)]
pub struct FlightStatistics {
    start: Option<FlightStart>,
    distance_nm: f64,
    max_altitude_ft: f64,
    max_speed_kts: f64,
    speed_samples: VecDeque<f64>,
    last_position: Option<PositionSample>,
}

impl FlightStatistics {
    pub fn start(&self) -> Option<&FlightStart> {
        self.start.as_ref()
    }

    /// Cumulative great-circle distance in nautical miles.
    pub fn distance_nm(&self) -> f64 {
        self.distance_nm
    }

    pub fn max_altitude_ft(&self) -> f64 {
        self.max_altitude_ft
    }

    pub fn max_speed_kts(&self) -> f64 {
        self.max_speed_kts
    }

    /// Recent ground speeds in knots, oldest first.
    pub fn speed_samples(&self) -> &VecDeque<f64> {
        &self.speed_samples
    }

    /// Mean of the rolling speed window, 0 when empty.
    pub fn average_speed_kts(&self) -> f64 {
        if self.speed_samples.is_empty() {
            return 0.0;
        }
        self.speed_samples.iter().sum::<f64>() / self.speed_samples.len() as f64
    }

    pub fn last_position(&self) -> Option<&PositionSample> {
        self.last_position.as_ref()
    }
}

/// Consumes position fixes and maintains [`FlightStatistics`].
#[derive(Debug, Clone)]
pub struct StatisticsAccumulator {
    config: StatisticsConfig,
    stats: FlightStatistics,
}

impl Default for StatisticsAccumulator {
    fn default() -> Self {
        Self::new(StatisticsConfig::default())
    }
}

impl StatisticsAccumulator {
    pub fn new(config: StatisticsConfig) -> Self {
        Self {
            config,
            stats: FlightStatistics::default(),
        }
    }

    pub fn config(&self) -> &StatisticsConfig {
        &self.config
    }

    pub fn statistics(&self) -> &FlightStatistics {
        &self.stats
    }

    pub fn phase(&self) -> FlightPhase {
        if self.stats.start.is_some() {
            FlightPhase::Active
        } else {
            FlightPhase::Idle
        }
    }

    /// Feed one new fix, timestamped now.
    pub fn update(&mut self, position: &PositionSample) {
        self.update_at(position, Instant::now());
    }

    /// Feed one new fix observed at `now`.
    ///
    /// # Panics
    ///
    /// Panics if any field of `position` is not finite. The parser never
    /// produces such samples, so this is a caller bug.
    pub fn update_at(&mut self, position: &PositionSample, now: Instant) {
        assert!(
            position.is_finite(),
            "position sample must be finite: {:?}",
            position
        );

        let altitude_ft = position.altitude_ft();
        let speed_kts = position.ground_speed_kts();
        let stats = &mut self.stats;

        if stats.start.is_none() && speed_kts > self.config.motion_threshold_kts {
            tracing::info!(
                lat = position.latitude,
                lon = position.longitude,
                gs_kts = speed_kts,
                "Flight started"
            );
            stats.start = Some(FlightStart {
                instant: now,
                wall_clock: Utc::now(),
                position: *position,
            });
        }

        stats.max_altitude_ft = stats.max_altitude_ft.max(altitude_ft);
        stats.max_speed_kts = stats.max_speed_kts.max(speed_kts);

        stats.speed_samples.push_back(speed_kts);
        while stats.speed_samples.len() > self.config.speed_window {
            stats.speed_samples.pop_front();
        }

        if let Some(last) = stats.last_position {
            stats.distance_nm += haversine_distance_nm(last.lat_lon(), position.lat_lon());
        }
        stats.last_position = Some(*position);
    }

    /// Elapsed flight time, `None` while Idle.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed_at(Instant::now())
    }

    /// Elapsed flight time as seen at `now`.
    pub fn elapsed_at(&self, now: Instant) -> Option<Duration> {
        self.stats
            .start
            .map(|start| now.saturating_duration_since(start.instant))
    }

    /// Elapsed flight time formatted `HH:MM:SS`, `None` while Idle.
    pub fn formatted_elapsed(&self) -> Option<String> {
        self.elapsed().map(format_hms)
    }

    /// Clear every derived metric and return to Idle.
    pub fn reset(&mut self) {
        self.stats = FlightStatistics::default();
        tracing::debug!("Flight statistics reset");
    }
}
