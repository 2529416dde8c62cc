//! Text formatting shared by the presenters.
//!
//! Pure functions only, so the layout can be tested without a terminal.

use std::time::Duration;

use skytrack::flight::StatisticsReport;
use skytrack::telemetry::{AttitudeSample, PositionSample, TelemetrySnapshot};
use skytrack::units::UnitSystem;

/// Shown until both samples have arrived, and again once the link goes stale.
pub const WAITING_MESSAGE: &str = "Waiting for data...";

const BORDER_WIDTH: usize = 24;

/// Connection state as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkStatus {
    /// Nothing received yet.
    Waiting,
    /// A valid datagram arrived within the receive timeout.
    Connected,
    /// Data exists but has gone stale.
    Lost { age: Option<Duration> },
}

impl LinkStatus {
    pub fn from_snapshot(snapshot: &TelemetrySnapshot) -> Self {
        if snapshot.connected {
            Self::Connected
        } else if snapshot.last_receive_age.is_none() {
            Self::Waiting
        } else {
            Self::Lost {
                age: snapshot.last_receive_age,
            }
        }
    }

    /// One-line description including the listening port.
    pub fn describe(&self, port: u16) -> String {
        match self {
            Self::Waiting => format!("Waiting for telemetry on UDP port {}", port),
            Self::Connected => format!("Connected (UDP port {})", port),
            Self::Lost { age: Some(age) } => {
                format!("Signal lost, last datagram {}s ago", age.as_secs())
            }
            Self::Lost { age: None } => "Signal lost".to_string(),
        }
    }
}

/// Rows of the aircraft info block, without borders.
pub fn info_rows(
    position: &PositionSample,
    attitude: &AttitudeSample,
    units: UnitSystem,
) -> Vec<String> {
    vec![
        format!("{:<15}{:>8.2}°", "Latitude:", position.latitude),
        format!("{:<15}{:>8.2}°", "Longitude:", position.longitude),
        format!(
            "{:<15}{:>6.0} {}",
            "Altitude:",
            units.altitude(position.altitude_ft()),
            units.altitude_unit()
        ),
        format!(
            "{:<15}{:>5.2} {}",
            "Ground Speed:",
            units.speed(position.ground_speed_kts()),
            units.speed_unit()
        ),
        format!("{:<15}{:>8.2}°", "True Heading:", attitude.true_heading),
        format!("{:<15}{:>8.2}°", "Pitch:", attitude.pitch),
        format!("{:<15}{:>8.2}°", "Roll:", attitude.roll),
    ]
}

/// Samples worth displaying: both present and not stale.
pub fn live_samples(snapshot: &TelemetrySnapshot) -> Option<(PositionSample, AttitudeSample)> {
    match (snapshot.connected, snapshot.position, snapshot.attitude) {
        (true, Some(position), Some(attitude)) => Some((position, attitude)),
        _ => None,
    }
}

/// The bordered info block, or the waiting message when there is no live data.
pub fn info_text(snapshot: &TelemetrySnapshot, units: UnitSystem) -> String {
    let Some((position, attitude)) = live_samples(snapshot) else {
        return WAITING_MESSAGE.to_string();
    };

    let border = "=".repeat(BORDER_WIDTH);
    let mut text = String::new();
    text.push_str(&border);
    text.push('\n');
    for row in info_rows(&position, &attitude, units) {
        text.push_str(&row);
        text.push('\n');
    }
    text.push_str(&border);
    text.push('\n');
    text
}

/// Statistics report split into display rows.
pub fn statistics_rows(report: &StatisticsReport) -> Vec<String> {
    report.to_string().lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use skytrack::flight::FlightTracker;

    fn snapshot(connected: bool, age: Option<Duration>) -> TelemetrySnapshot {
        TelemetrySnapshot {
            position: Some(PositionSample::new(-122.5, 45.5, 3048.0, 270.5, 154.3)),
            attitude: Some(AttitudeSample::new(45.5, 5.2, -3.1)),
            connected,
            position_seq: 1,
            last_receive_age: age,
        }
    }

    #[test]
    fn test_info_text_layout() {
        let text = info_text(&snapshot(true, Some(Duration::ZERO)), UnitSystem::Imperial);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "=".repeat(24));
        assert_eq!(lines[1], "Latitude:         45.50°");
        assert_eq!(lines[2], "Longitude:      -122.50°");
        assert_eq!(lines[3], "Altitude:       10000 ft");
        assert_eq!(lines[4], "Ground Speed:  299.93 kts");
        assert_eq!(lines[7], "Roll:              -3.10°");
        assert_eq!(lines[8], "=".repeat(24));
    }

    #[test]
    fn test_info_text_metric() {
        let text = info_text(&snapshot(true, Some(Duration::ZERO)), UnitSystem::Metric);
        assert!(text.contains("Altitude:        3048 m"));
        assert!(text.contains("km/h"));
    }

    #[test]
    fn test_info_text_waits_for_both_samples() {
        let mut partial = snapshot(true, Some(Duration::ZERO));
        partial.attitude = None;
        assert_eq!(info_text(&partial, UnitSystem::Imperial), WAITING_MESSAGE);

        assert_eq!(
            info_text(&TelemetrySnapshot::default(), UnitSystem::Imperial),
            WAITING_MESSAGE
        );
    }

    #[test]
    fn test_info_text_clears_when_stale() {
        let stale = snapshot(false, Some(Duration::from_secs(7)));
        assert!(live_samples(&stale).is_none());
        assert_eq!(info_text(&stale, UnitSystem::Imperial), WAITING_MESSAGE);
    }

    #[test]
    fn test_link_status() {
        assert_eq!(
            LinkStatus::from_snapshot(&TelemetrySnapshot::default()),
            LinkStatus::Waiting
        );
        assert_eq!(
            LinkStatus::from_snapshot(&snapshot(true, Some(Duration::ZERO))),
            LinkStatus::Connected
        );

        let lost = LinkStatus::from_snapshot(&snapshot(false, Some(Duration::from_secs(7))));
        assert_eq!(lost.describe(49002), "Signal lost, last datagram 7s ago");
        assert!(LinkStatus::Waiting.describe(49002).contains("49002"));
    }

    #[test]
    fn test_statistics_rows_idle() {
        let report = FlightTracker::default().get_statistics();
        let rows = statistics_rows(&report);

        assert!(rows[0].starts_with("Flight Time:"));
        assert!(rows[0].ends_with("--:--:--"));
        assert!(rows.iter().any(|r| r.starts_with("Trail Points:")));
    }

    proptest! {
        #[test]
        fn prop_info_block_shape_is_stable(
            lat in -90.0f64..90.0,
            lon in -180.0f64..180.0,
            alt in -500.0f64..20000.0,
            gs in 0.0f64..400.0,
            hdg in 0.0f64..360.0,
            metric in any::<bool>(),
        ) {
            let units = if metric { UnitSystem::Metric } else { UnitSystem::Imperial };
            let snapshot = TelemetrySnapshot {
                position: Some(PositionSample::new(lon, lat, alt, hdg, gs)),
                attitude: Some(AttitudeSample::new(hdg, 0.0, 0.0)),
                connected: true,
                position_seq: 1,
                last_receive_age: Some(Duration::ZERO),
            };

            let text = info_text(&snapshot, units);
            let lines: Vec<&str> = text.lines().collect();
            prop_assert_eq!(lines.len(), 9);
            prop_assert_eq!(lines[0], lines[8]);
            for row in &lines[1..8] {
                prop_assert!(row.chars().take(15).any(|c| c == ':'));
            }
        }
    }
}
