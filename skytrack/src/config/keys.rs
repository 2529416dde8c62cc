//! Configuration key access and validation.
//!
//! Provides a type-safe interface for getting and setting configuration
//! values by key name, with validation via the Specification Pattern.

use std::str::FromStr;
use thiserror::Error;

use super::file::{expand_tilde, path_to_display};
use super::settings::ConfigFile;
use crate::flight::MAX_SPEED_WINDOW;
use crate::units::UnitSystem;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
///
/// Each key maps to a specific field in [`ConfigFile`] and knows how to
/// get and set its value with proper validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    // Telemetry settings
    TelemetryPort,
    TelemetryClientName,
    TelemetryReceiveTimeout,
    TelemetryPollTimeout,

    // Statistics settings
    StatisticsMotionThreshold,
    StatisticsSpeedWindow,
    StatisticsTrailSpacing,

    // Display settings
    DisplayUnits,
    DisplayUpdateInterval,

    // Logging settings
    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == lower)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "telemetry.port").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::TelemetryPort => "telemetry.port",
            ConfigKey::TelemetryClientName => "telemetry.client_name",
            ConfigKey::TelemetryReceiveTimeout => "telemetry.receive_timeout",
            ConfigKey::TelemetryPollTimeout => "telemetry.poll_timeout",
            ConfigKey::StatisticsMotionThreshold => "statistics.motion_threshold",
            ConfigKey::StatisticsSpeedWindow => "statistics.speed_window",
            ConfigKey::StatisticsTrailSpacing => "statistics.trail_spacing",
            ConfigKey::DisplayUnits => "display.units",
            ConfigKey::DisplayUpdateInterval => "display.update_interval",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "telemetry").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "port").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::TelemetryPort => config.telemetry.port.to_string(),
            ConfigKey::TelemetryClientName => config.telemetry.client_name.clone(),
            ConfigKey::TelemetryReceiveTimeout => config.telemetry.receive_timeout_secs.to_string(),
            ConfigKey::TelemetryPollTimeout => config.telemetry.poll_timeout_ms.to_string(),
            ConfigKey::StatisticsMotionThreshold => {
                config.statistics.motion_threshold_kts.to_string()
            }
            ConfigKey::StatisticsSpeedWindow => config.statistics.speed_window.to_string(),
            ConfigKey::StatisticsTrailSpacing => config.statistics.trail_spacing_deg.to_string(),
            ConfigKey::DisplayUnits => config.display.units.to_string(),
            ConfigKey::DisplayUpdateInterval => config.display.update_interval_ms.to_string(),
            ConfigKey::LoggingFile => path_to_display(&config.logging.file),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value according to the key's specification before setting.
    /// On failure the config is left unchanged.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;
        let value = value.trim();
        let invalid = |reason: &str| ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason: reason.to_string(),
        };

        match self {
            ConfigKey::TelemetryPort => {
                config.telemetry.port = value.parse().map_err(|_| invalid("not a port"))?;
            }
            ConfigKey::TelemetryClientName => {
                config.telemetry.client_name = value.to_string();
            }
            ConfigKey::TelemetryReceiveTimeout => {
                config.telemetry.receive_timeout_secs =
                    value.parse().map_err(|_| invalid("not an integer"))?;
            }
            ConfigKey::TelemetryPollTimeout => {
                config.telemetry.poll_timeout_ms =
                    value.parse().map_err(|_| invalid("not an integer"))?;
            }
            ConfigKey::StatisticsMotionThreshold => {
                config.statistics.motion_threshold_kts =
                    value.parse().map_err(|_| invalid("not a number"))?;
            }
            ConfigKey::StatisticsSpeedWindow => {
                config.statistics.speed_window =
                    value.parse().map_err(|_| invalid("not an integer"))?;
            }
            ConfigKey::StatisticsTrailSpacing => {
                config.statistics.trail_spacing_deg =
                    value.parse().map_err(|_| invalid("not a number"))?;
            }
            ConfigKey::DisplayUnits => {
                config.display.units = value
                    .parse::<UnitSystem>()
                    .map_err(|e| invalid(&e.to_string()))?;
            }
            ConfigKey::DisplayUpdateInterval => {
                config.display.update_interval_ms =
                    value.parse().map_err(|_| invalid("not an integer"))?;
            }
            ConfigKey::LoggingFile => {
                config.logging.file = expand_tilde(value);
            }
        }
        Ok(())
    }

    /// Validate a value according to this key's specification.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value.trim())
            .map_err(|reason| ConfigKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason,
            })
    }

    /// Get the validation specification for this key.
    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::TelemetryPort => Box::new(PortSpec),
            ConfigKey::TelemetryClientName => Box::new(NonEmptySpec),
            ConfigKey::TelemetryReceiveTimeout => Box::new(NonZeroIntegerSpec),
            ConfigKey::TelemetryPollTimeout => Box::new(NonZeroIntegerSpec),
            ConfigKey::StatisticsMotionThreshold => Box::new(NonNegativeNumberSpec),
            ConfigKey::StatisticsSpeedWindow => Box::new(IntegerRangeSpec {
                min: 1,
                max: MAX_SPEED_WINDOW as u64,
            }),
            ConfigKey::StatisticsTrailSpacing => Box::new(NonNegativeNumberSpec),
            ConfigKey::DisplayUnits => Box::new(OneOfSpec::new(&["imperial", "metric"])),
            ConfigKey::DisplayUpdateInterval => Box::new(NonZeroIntegerSpec),
            ConfigKey::LoggingFile => Box::new(NonEmptySpec),
        }
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::TelemetryPort,
            ConfigKey::TelemetryClientName,
            ConfigKey::TelemetryReceiveTimeout,
            ConfigKey::TelemetryPollTimeout,
            ConfigKey::StatisticsMotionThreshold,
            ConfigKey::StatisticsSpeedWindow,
            ConfigKey::StatisticsTrailSpacing,
            ConfigKey::DisplayUnits,
            ConfigKey::DisplayUpdateInterval,
            ConfigKey::LoggingFile,
        ]
    }
}

// ============================================================================
// Value Specifications (Specification Pattern)
// ============================================================================

/// Trait for value validation specifications.
trait ValueSpecification {
    /// Check if the value satisfies this specification.
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Specification that requires the value to be one of a set of options.
struct OneOfSpec {
    options: &'static [&'static str],
}

impl OneOfSpec {
    fn new(options: &'static [&'static str]) -> Self {
        Self { options }
    }
}

impl ValueSpecification for OneOfSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        let lower = value.to_lowercase();
        if self.options.iter().any(|opt| *opt == lower) {
            Ok(())
        } else {
            Err(format!("must be one of: {}", self.options.join(", ")))
        }
    }
}

/// Specification for UDP port numbers.
struct PortSpec;

impl ValueSpecification for PortSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u16>() {
            Ok(port) if port > 0 => Ok(()),
            _ => Err("must be a port number (1-65535)".to_string()),
        }
    }
}

/// Specification for integers greater than zero.
struct NonZeroIntegerSpec;

impl ValueSpecification for NonZeroIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err("must be a positive integer".to_string()),
        }
    }
}

/// Specification for integers within an inclusive range.
struct IntegerRangeSpec {
    min: u64,
    max: u64,
}

impl ValueSpecification for IntegerRangeSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u64>() {
            Ok(n) if (self.min..=self.max).contains(&n) => Ok(()),
            _ => Err(format!("must be an integer from {} to {}", self.min, self.max)),
        }
    }
}

/// Specification for finite numbers that are zero or more.
struct NonNegativeNumberSpec;

impl ValueSpecification for NonNegativeNumberSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(()),
            _ => Err("must be a non-negative number".to_string()),
        }
    }
}

/// Specification for non-empty strings.
struct NonEmptySpec;

impl ValueSpecification for NonEmptySpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err("must not be empty".to_string())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_parsing() {
        assert_eq!(
            "telemetry.port".parse::<ConfigKey>().unwrap(),
            ConfigKey::TelemetryPort
        );
        assert_eq!(
            "display.units".parse::<ConfigKey>().unwrap(),
            ConfigKey::DisplayUnits
        );
        // Case insensitive
        assert_eq!(
            "STATISTICS.SPEED_WINDOW".parse::<ConfigKey>().unwrap(),
            ConfigKey::StatisticsSpeedWindow
        );
        assert!("invalid.key".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_key_name_parts() {
        assert_eq!(ConfigKey::TelemetryClientName.section(), "telemetry");
        assert_eq!(ConfigKey::TelemetryClientName.key_name(), "client_name");
        assert_eq!(ConfigKey::LoggingFile.section(), "logging");
        assert_eq!(ConfigKey::LoggingFile.key_name(), "file");
    }

    #[test]
    fn test_every_key_round_trips_through_name() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }

    #[test]
    fn test_get_value() {
        let config = ConfigFile::default();

        assert_eq!(ConfigKey::TelemetryPort.get(&config), "49002");
        assert_eq!(ConfigKey::TelemetryClientName.get(&config), "Aerofly FS 4");
        assert_eq!(ConfigKey::StatisticsTrailSpacing.get(&config), "0.0005");
        assert_eq!(ConfigKey::DisplayUnits.get(&config), "imperial");
    }

    #[test]
    fn test_set_value() {
        let mut config = ConfigFile::default();

        ConfigKey::TelemetryPort.set(&mut config, "49010").unwrap();
        assert_eq!(config.telemetry.port, 49010);

        ConfigKey::DisplayUnits.set(&mut config, "METRIC").unwrap();
        assert_eq!(config.display.units, UnitSystem::Metric);

        ConfigKey::StatisticsMotionThreshold
            .set(&mut config, "7.5")
            .unwrap();
        assert_eq!(config.statistics.motion_threshold_kts, 7.5);

        ConfigKey::TelemetryClientName
            .set(&mut config, "X-Plane")
            .unwrap();
        assert_eq!(config.telemetry.client_name, "X-Plane");
    }

    #[test]
    fn test_validate_port() {
        assert!(ConfigKey::TelemetryPort.validate("49002").is_ok());
        assert!(ConfigKey::TelemetryPort.validate("0").is_err());
        assert!(ConfigKey::TelemetryPort.validate("65536").is_err());
        assert!(ConfigKey::TelemetryPort.validate("abc").is_err());
    }

    #[test]
    fn test_validate_positive_integer() {
        assert!(ConfigKey::StatisticsSpeedWindow.validate("100").is_ok());
        assert!(ConfigKey::StatisticsSpeedWindow.validate("0").is_err());
        assert!(ConfigKey::StatisticsSpeedWindow.validate("-1").is_err());
        assert!(ConfigKey::StatisticsSpeedWindow.validate("10000").is_ok());
    }

    #[test]
    fn test_oversized_window_rejected() {
        let mut config = ConfigFile::default();

        let err = ConfigKey::StatisticsSpeedWindow
            .set(&mut config, "18446744073709551615")
            .unwrap_err();
        assert!(err.to_string().contains("from 1 to 10000"));
        assert!(ConfigKey::StatisticsSpeedWindow
            .set(&mut config, "10001")
            .is_err());
        assert_eq!(config.statistics.speed_window, 100);
    }

    #[test]
    fn test_validate_number() {
        assert!(ConfigKey::StatisticsTrailSpacing.validate("0").is_ok());
        assert!(ConfigKey::StatisticsTrailSpacing.validate("0.01").is_ok());
        assert!(ConfigKey::StatisticsTrailSpacing.validate("-0.01").is_err());
        assert!(ConfigKey::StatisticsTrailSpacing.validate("inf").is_err());
    }

    #[test]
    fn test_set_invalid_value_fails() {
        let mut config = ConfigFile::default();

        let result = ConfigKey::DisplayUnits.set(&mut config, "nautical");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("imperial, metric"));

        // Config should be unchanged
        assert_eq!(config.display.units, UnitSystem::Imperial);
    }

    #[test]
    fn test_empty_client_name_rejected() {
        let mut config = ConfigFile::default();
        assert!(ConfigKey::TelemetryClientName
            .set(&mut config, "  ")
            .is_err());
        assert_eq!(config.telemetry.client_name, "Aerofly FS 4");
    }
}
