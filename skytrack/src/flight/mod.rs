//! Derived flight statistics.
//!
//! - [`statistics`] - `StatisticsAccumulator`, the Idle/Active state machine
//!   that tracks distance, maxima and the rolling speed average
//! - [`path`] - `FlightPath`, the spaced breadcrumb trail
//! - [`tracker`] - `FlightTracker`, the facade the poll loop talks to
//!
//! Everything here runs on the poll side. Nothing is shared with the
//! receive task, so no locking is needed.

pub mod path;
pub mod statistics;
pub mod tracker;

pub use path::{FlightPath, DEFAULT_TRAIL_SPACING_DEG};
pub use statistics::{
    FlightPhase, FlightStart, FlightStatistics, StatisticsAccumulator, StatisticsConfig,
    DEFAULT_MOTION_THRESHOLD_KTS, DEFAULT_SPEED_WINDOW, MAX_SPEED_WINDOW,
};
pub use tracker::{FlightTracker, FlightTrackerConfig, StatisticsReport};
