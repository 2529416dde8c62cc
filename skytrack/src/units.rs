//! Unit conversions and display unit systems.
//!
//! Flight statistics are stored in aviation units (feet, knots, nautical
//! miles). A [`UnitSystem`] only changes how those stored values are shown.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Conversion factor: meters to feet.
pub const METERS_TO_FEET: f64 = 3.28084;

/// Conversion factor: meters per second to knots.
pub const MPS_TO_KNOTS: f64 = 1.94384;

/// Conversion factor: nautical miles to kilometers (and knots to km/h).
pub const NM_TO_KM: f64 = 1.852;

/// Error returned when parsing an unknown unit system name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown unit system '{0}' (expected 'imperial' or 'metric')")]
pub struct UnitParseError(pub String);

/// Display unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    /// Feet, knots, nautical miles.
    #[default]
    Imperial,
    /// Meters, km/h, kilometers.
    Metric,
}

impl UnitSystem {
    /// Convert an altitude in feet to this system.
    pub fn altitude(&self, feet: f64) -> f64 {
        match self {
            Self::Imperial => feet,
            Self::Metric => feet / METERS_TO_FEET,
        }
    }

    /// Convert a speed in knots to this system.
    pub fn speed(&self, knots: f64) -> f64 {
        match self {
            Self::Imperial => knots,
            Self::Metric => knots * NM_TO_KM,
        }
    }

    /// Convert a distance in nautical miles to this system.
    pub fn distance(&self, nautical_miles: f64) -> f64 {
        match self {
            Self::Imperial => nautical_miles,
            Self::Metric => nautical_miles * NM_TO_KM,
        }
    }

    pub fn altitude_unit(&self) -> &'static str {
        match self {
            Self::Imperial => "ft",
            Self::Metric => "m",
        }
    }

    pub fn speed_unit(&self) -> &'static str {
        match self {
            Self::Imperial => "kts",
            Self::Metric => "km/h",
        }
    }

    pub fn distance_unit(&self) -> &'static str {
        match self {
            Self::Imperial => "nm",
            Self::Metric => "km",
        }
    }

    /// The other unit system.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Imperial => Self::Metric,
            Self::Metric => Self::Imperial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Imperial => "imperial",
            Self::Metric => "metric",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "imperial" => Ok(Self::Imperial),
            "metric" => Ok(Self::Metric),
            _ => Err(UnitParseError(s.to_string())),
        }
    }
}

/// Format a duration as zero-padded `HH:MM:SS`.
///
/// Hours are not wrapped at 24.
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}
