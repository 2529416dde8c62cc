//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use crate::flight::{FlightTrackerConfig, StatisticsConfig};
use crate::telemetry::TelemetryReceiverConfig;
use crate::units::UnitSystem;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    /// Telemetry receiver settings
    pub telemetry: TelemetrySettings,
    /// Flight statistics settings
    pub statistics: StatisticsSettings,
    /// Console display settings
    pub display: DisplaySettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Telemetry receiver configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySettings {
    /// UDP port for simulator broadcasts.
    pub port: u16,
    /// Simulator name expected after the `XGPS`/`XATT` tag.
    pub client_name: String,
    /// Seconds without data before the link counts as disconnected.
    pub receive_timeout_secs: u64,
    /// Socket read timeout in milliseconds.
    pub poll_timeout_ms: u64,
}

/// Flight statistics configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSettings {
    /// Ground speed in knots that starts the flight clock.
    pub motion_threshold_kts: f64,
    /// Samples in the rolling speed average.
    pub speed_window: usize,
    /// Minimum trail spacing in degrees.
    pub trail_spacing_deg: f64,
}

/// Console display configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub units: UnitSystem,
    /// Poll and redraw period in milliseconds.
    pub update_interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

impl TelemetrySettings {
    /// Receiver configuration bound to all interfaces.
    pub fn to_receiver_config(&self) -> TelemetryReceiverConfig {
        TelemetryReceiverConfig {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: self.port,
            client_name: self.client_name.clone(),
            receive_timeout: Duration::from_secs(self.receive_timeout_secs),
            poll_timeout: Duration::from_millis(self.poll_timeout_ms),
        }
    }
}

impl ConfigFile {
    /// Flight tracker configuration from the statistics and display sections.
    pub fn to_tracker_config(&self) -> FlightTrackerConfig {
        FlightTrackerConfig {
            statistics: StatisticsConfig {
                motion_threshold_kts: self.statistics.motion_threshold_kts,
                speed_window: self.statistics.speed_window,
            },
            trail_spacing_deg: self.statistics.trail_spacing_deg,
            units: self.display.units,
        }
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.display.update_interval_ms)
    }
}
