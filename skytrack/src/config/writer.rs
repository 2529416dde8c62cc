//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented representation written to `config.ini`.

use super::file::path_to_display;
use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[telemetry]
; UDP port the simulator broadcasts to (default: 49002)
; Aerofly FS 4: Settings > Miscellaneous > Broadcast flight info to IP address
port = {}
; Simulator name that follows the XGPS/XATT tag in each datagram
client_name = {}
; Seconds without data before the link is shown as disconnected (default: 5)
receive_timeout = {}
; Socket read timeout in milliseconds (default: 500)
poll_timeout = {}

[statistics]
; Ground speed in knots above which the flight timer starts (default: 5)
motion_threshold = {}
; Number of recent speed samples averaged (default: 100)
speed_window = {}
; Minimum spacing between trail points in degrees (default: 0.0005)
trail_spacing = {}

[display]
; Unit system: imperial (ft, kts, nm) or metric (m, km/h, km)
units = {}
; Refresh period in milliseconds (default: 100)
update_interval = {}

[logging]
; Log file path (default: ~/.skytrack/skytrack.log)
file = {}
"#,
        config.telemetry.port,
        config.telemetry.client_name,
        config.telemetry.receive_timeout_secs,
        config.telemetry.poll_timeout_ms,
        config.statistics.motion_threshold_kts,
        config.statistics.speed_window,
        config.statistics.trail_spacing_deg,
        config.display.units,
        config.display.update_interval_ms,
        path_to_display(&config.logging.file),
    )
}
