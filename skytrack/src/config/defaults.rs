//! Default values and constants for all configuration settings.

use super::file::config_directory;
use super::settings::*;
use crate::flight::{
    DEFAULT_MOTION_THRESHOLD_KTS, DEFAULT_SPEED_WINDOW, DEFAULT_TRAIL_SPACING_DEG,
};
use crate::telemetry::{
    DEFAULT_CLIENT_NAME, DEFAULT_POLL_TIMEOUT, DEFAULT_PORT, DEFAULT_RECEIVE_TIMEOUT,
};
use crate::units::UnitSystem;

/// Default staleness threshold in seconds.
pub const DEFAULT_RECEIVE_TIMEOUT_SECS: u64 = DEFAULT_RECEIVE_TIMEOUT.as_secs();

/// Default socket read timeout in milliseconds.
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = DEFAULT_POLL_TIMEOUT.as_millis() as u64;

/// Default console refresh period in milliseconds.
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 100;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "skytrack.log";

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            receive_timeout_secs: DEFAULT_RECEIVE_TIMEOUT_SECS,
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
        }
    }
}

impl Default for StatisticsSettings {
    fn default() -> Self {
        Self {
            motion_threshold_kts: DEFAULT_MOTION_THRESHOLD_KTS,
            speed_window: DEFAULT_SPEED_WINDOW,
            trail_spacing_deg: DEFAULT_TRAIL_SPACING_DEG,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            units: UnitSystem::Imperial,
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: config_directory().join(DEFAULT_LOG_FILE_NAME),
        }
    }
}
