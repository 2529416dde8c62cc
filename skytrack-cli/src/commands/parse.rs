//! Parse command - decode a single datagram line.
//!
//! Useful for checking what a simulator sends before starting a session.

use skytrack::telemetry::{parse_line, Datagram, DEFAULT_CLIENT_NAME};
use skytrack::units::UnitSystem;

use crate::error::CliError;

/// Run the parse command.
pub fn run(line: &str, client_name: Option<&str>) -> Result<(), CliError> {
    let client_name = client_name.unwrap_or(DEFAULT_CLIENT_NAME);
    let datagram =
        parse_line(line, client_name).ok_or_else(|| CliError::NoMatch(line.to_string()))?;

    print!("{}", describe(&datagram, UnitSystem::Imperial));
    Ok(())
}

/// Human-readable breakdown of a decoded datagram.
fn describe(datagram: &Datagram, units: UnitSystem) -> String {
    match datagram {
        Datagram::Position(pos) => format!(
            "Position (XGPS)\n\
             {:<15}{:>12.6}°\n\
             {:<15}{:>12.6}°\n\
             {:<15}{:>12.1} m ({:.0} {})\n\
             {:<15}{:>12.1}°\n\
             {:<15}{:>12.2} m/s ({:.1} {})\n",
            "Longitude:",
            pos.longitude,
            "Latitude:",
            pos.latitude,
            "Altitude:",
            pos.altitude,
            units.altitude(pos.altitude_ft()),
            units.altitude_unit(),
            "Track:",
            pos.track,
            "Ground Speed:",
            pos.ground_speed,
            units.speed(pos.ground_speed_kts()),
            units.speed_unit(),
        ),
        Datagram::Attitude(att) => format!(
            "Attitude (XATT)\n\
             {:<15}{:>12.2}°\n\
             {:<15}{:>12.2}°\n\
             {:<15}{:>12.2}°\n",
            "True Heading:",
            att.true_heading,
            "Pitch:",
            att.pitch,
            "Roll:",
            att.roll,
        ),
    }
}
