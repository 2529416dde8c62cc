//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::str::FromStr;

use ini::{Ini, Properties};

use super::file::{expand_tilde, ConfigFileError};
use super::settings::ConfigFile;
use crate::flight::MAX_SPEED_WINDOW;
use crate::units::UnitSystem;

const PORT_REASON: &str = "must be a port number (1-65535)";
const SECONDS_REASON: &str = "must be a positive integer (seconds)";
const MILLIS_REASON: &str = "must be a positive integer (milliseconds)";
const SAMPLES_REASON: &str = "must be an integer from 1 to 10000 (samples)";
const KNOTS_REASON: &str = "must be a non-negative number (knots)";
const DEGREES_REASON: &str = "must be a non-negative number (degrees)";

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [telemetry] section
    if let Some(section) = ini.section(Some("telemetry")) {
        let s = SectionReader::new("telemetry", section);
        if let Some(port) = s.parse::<u16>("port", PORT_REASON)? {
            if port == 0 {
                return Err(s.invalid("port", "0", PORT_REASON));
            }
            config.telemetry.port = port;
        }
        if let Some(v) = section.get("client_name") {
            let v = v.trim();
            if v.is_empty() {
                return Err(s.invalid("client_name", v, "must not be empty"));
            }
            config.telemetry.client_name = v.to_string();
        }
        if let Some(v) = s.parse_nonzero("receive_timeout", SECONDS_REASON)? {
            config.telemetry.receive_timeout_secs = v;
        }
        if let Some(v) = s.parse_nonzero("poll_timeout", MILLIS_REASON)? {
            config.telemetry.poll_timeout_ms = v;
        }
    }

    // [statistics] section
    if let Some(section) = ini.section(Some("statistics")) {
        let s = SectionReader::new("statistics", section);
        if let Some(v) = s.parse_non_negative("motion_threshold", KNOTS_REASON)? {
            config.statistics.motion_threshold_kts = v;
        }
        if let Some(v) = s.parse_nonzero("speed_window", SAMPLES_REASON)? {
            config.statistics.speed_window = usize::try_from(v)
                .ok()
                .filter(|n| *n <= MAX_SPEED_WINDOW)
                .ok_or_else(|| s.invalid("speed_window", &v.to_string(), SAMPLES_REASON))?;
        }
        if let Some(v) = s.parse_non_negative("trail_spacing", DEGREES_REASON)? {
            config.statistics.trail_spacing_deg = v;
        }
    }

    // [display] section
    if let Some(section) = ini.section(Some("display")) {
        let s = SectionReader::new("display", section);
        if let Some(units) = s.parse::<UnitSystem>("units", "must be 'imperial' or 'metric'")? {
            config.display.units = units;
        }
        if let Some(v) = s.parse_nonzero("update_interval", MILLIS_REASON)? {
            config.display.update_interval_ms = v;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Typed access to the keys of one INI section.
struct SectionReader<'a> {
    name: &'static str,
    section: &'a Properties,
}

impl<'a> SectionReader<'a> {
    fn new(name: &'static str, section: &'a Properties) -> Self {
        Self { name, section }
    }

    fn invalid(&self, key: &str, value: &str, reason: &str) -> ConfigFileError {
        ConfigFileError::InvalidValue {
            section: self.name.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Parse `key` if present. Absent keys keep their default.
    fn parse<T: FromStr>(&self, key: &str, reason: &str) -> Result<Option<T>, ConfigFileError> {
        match self.section.get(key) {
            None => Ok(None),
            Some(v) => v
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| self.invalid(key, v, reason)),
        }
    }

    fn parse_nonzero(&self, key: &str, reason: &str) -> Result<Option<u64>, ConfigFileError> {
        match self.parse::<u64>(key, reason)? {
            Some(0) => Err(self.invalid(key, "0", reason)),
            other => Ok(other),
        }
    }

    fn parse_non_negative(&self, key: &str, reason: &str) -> Result<Option<f64>, ConfigFileError> {
        match self.parse::<f64>(key, reason)? {
            Some(v) if !v.is_finite() || v < 0.0 => {
                Err(self.invalid(key, &v.to_string(), reason))
            }
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::settings::ConfigFile;
    use crate::units::UnitSystem;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, crate::config::ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_full_config() {
        let config = load(
            r#"
[telemetry]
port = 49005
client_name = X-Plane
receive_timeout = 3
poll_timeout = 250

[statistics]
motion_threshold = 8.5
speed_window = 20
trail_spacing = 0.001

[display]
units = metric
update_interval = 250

[logging]
file = /tmp/skytrack-test.log
"#,
        )
        .unwrap();

        assert_eq!(config.telemetry.port, 49005);
        assert_eq!(config.telemetry.client_name, "X-Plane");
        assert_eq!(config.telemetry.receive_timeout_secs, 3);
        assert_eq!(config.telemetry.poll_timeout_ms, 250);
        assert_eq!(config.statistics.motion_threshold_kts, 8.5);
        assert_eq!(config.statistics.speed_window, 20);
        assert_eq!(config.statistics.trail_spacing_deg, 0.001);
        assert_eq!(config.display.units, UnitSystem::Metric);
        assert_eq!(config.display.update_interval_ms, 250);
        assert_eq!(
            config.logging.file,
            std::path::PathBuf::from("/tmp/skytrack-test.log")
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = load(
            r#"
[display]
units = Metric
"#,
        )
        .unwrap();

        let defaults = ConfigFile::default();
        assert_eq!(config.display.units, UnitSystem::Metric);
        assert_eq!(config.telemetry, defaults.telemetry);
        assert_eq!(config.statistics, defaults.statistics);
    }

    #[test]
    fn test_client_name_with_spaces() {
        let config = load("[telemetry]\nclient_name = Aerofly FS 4\n").unwrap();
        assert_eq!(config.telemetry.client_name, "Aerofly FS 4");
    }

    #[test]
    fn test_invalid_port() {
        let err = load("[telemetry]\nport = 70000\n").unwrap_err();
        assert!(err.to_string().contains("telemetry.port"));

        let err = load("[telemetry]\nport = 0\n").unwrap_err();
        assert!(err.to_string().contains("1-65535"));
    }

    #[test]
    fn test_invalid_units() {
        let err = load("[display]\nunits = furlongs\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("display.units"));
        assert!(msg.contains("furlongs"));
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = load("[statistics]\nspeed_window = 0\n").unwrap_err();
        assert!(err.to_string().contains("speed_window"));
    }

    #[test]
    fn test_oversized_window_rejected() {
        let err = load("[statistics]\nspeed_window = 18446744073709551615\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("statistics.speed_window"));
        assert!(msg.contains("1 to 10000"));

        assert!(load("[statistics]\nspeed_window = 10001\n").is_err());
        let config = load("[statistics]\nspeed_window = 10000\n").unwrap();
        assert_eq!(config.statistics.speed_window, 10_000);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = load("[statistics]\nmotion_threshold = -1\n").unwrap_err();
        assert!(err.to_string().contains("non-negative"));

        assert!(load("[statistics]\ntrail_spacing = nan\n").is_err());
    }

    #[test]
    fn test_empty_client_name_rejected() {
        assert!(load("[telemetry]\nclient_name =\n").is_err());
    }
}
