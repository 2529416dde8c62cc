//! Simulator telemetry datagram parsing.
//!
//! Supports the two ForeFlight-style text records:
//! - **XGPS** - `XGPS<client>,lon,lat,alt_m,track,gs_m/s`
//! - **XATT** - `XATT<client>,true_heading,pitch,roll`
//!
//! `<client>` is the literal name of the sending simulator and is part of
//! the match. Anything that does not match is dropped: parsing never fails
//! loudly, it just yields `None`.

use tracing::trace;

use super::state::{AttitudeSample, PositionSample};

/// Record tag for position datagrams.
pub const POSITION_TAG: &str = "XGPS";

/// Record tag for attitude datagrams.
pub const ATTITUDE_TAG: &str = "XATT";

/// Number of numeric fields in an XGPS record.
const POSITION_FIELDS: usize = 5;

/// Number of numeric fields in an XATT record.
const ATTITUDE_FIELDS: usize = 3;

/// A successfully decoded datagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Datagram {
    Position(PositionSample),
    Attitude(AttitudeSample),
}

/// Decode raw datagram bytes and parse them.
///
/// Payloads that are not valid UTF-8 are dropped.
pub fn parse_datagram(data: &[u8], client_name: &str) -> Option<Datagram> {
    let text = match std::str::from_utf8(data) {
        Ok(text) => text,
        Err(e) => {
            trace!(error = %e, len = data.len(), "Datagram is not valid UTF-8");
            return None;
        }
    };
    parse_line(text, client_name)
}

/// Parse one line of text into a position or attitude datagram.
pub fn parse_line(line: &str, client_name: &str) -> Option<Datagram> {
    if line.starts_with(POSITION_TAG) {
        return parse_position(line, client_name).map(Datagram::Position);
    }
    if line.starts_with(ATTITUDE_TAG) {
        return parse_attitude(line, client_name).map(Datagram::Attitude);
    }
    None
}

/// Parse an XGPS record.
///
/// Format: `XGPS<client>,lon,lat,alt_m,track,gs_m/s`
pub fn parse_position(line: &str, client_name: &str) -> Option<PositionSample> {
    let [longitude, latitude, altitude, track, ground_speed] =
        parse_record::<POSITION_FIELDS>(line, POSITION_TAG, client_name)?;

    Some(PositionSample {
        longitude,
        latitude,
        altitude,
        track,
        ground_speed,
    })
}

/// Parse an XATT record.
///
/// Format: `XATT<client>,true_heading,pitch,roll`
pub fn parse_attitude(line: &str, client_name: &str) -> Option<AttitudeSample> {
    let [true_heading, pitch, roll] =
        parse_record::<ATTITUDE_FIELDS>(line, ATTITUDE_TAG, client_name)?;

    Some(AttitudeSample {
        true_heading,
        pitch,
        roll,
    })
}

/// Match `<tag><client>,` and parse exactly `N` numeric fields after it.
fn parse_record<const N: usize>(line: &str, tag: &str, client_name: &str) -> Option<[f64; N]> {
    let body = line
        .trim_end()
        .strip_prefix(tag)?
        .strip_prefix(client_name)?
        .strip_prefix(',')?;

    let parts: Vec<&str> = body.split(',').collect();
    if parts.len() != N {
        trace!(tag, expected = N, got = parts.len(), "Wrong field count");
        return None;
    }

    let mut values = [0.0; N];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = parse_field(part)?;
    }
    Some(values)
}

/// Parse a decimal field: optional `-`, digits and `.` only.
///
/// Rejects exponents, `inf`/`nan` and anything that overflows.
fn parse_field(field: &str) -> Option<f64> {
    if field.is_empty()
        || !field
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
    {
        return None;
    }

    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT: &str = "Aerofly FS 4";

    // ==================== XGPS tests ====================

    #[test]
    fn test_parse_position() {
        let line = "XGPSAerofly FS 4,-122.5,45.5,3048.0,270.5,154.3";
        let pos = parse_position(line, CLIENT).unwrap();

        assert_eq!(pos.longitude, -122.5);
        assert_eq!(pos.latitude, 45.5);
        assert_eq!(pos.altitude, 3048.0);
        assert_eq!(pos.track, 270.5);
        assert_eq!(pos.ground_speed, 154.3);
    }

    #[test]
    fn test_parse_position_integers_and_negatives() {
        let line = "XGPSAerofly FS 4,-74,40,-5,0,0";
        let pos = parse_position(line, CLIENT).unwrap();

        assert_eq!(pos.longitude, -74.0);
        assert_eq!(pos.latitude, 40.0);
        assert_eq!(pos.altitude, -5.0);
    }

    #[test]
    fn test_parse_position_trims_line_terminator() {
        let line = "XGPSAerofly FS 4,1.0,2.0,3.0,4.0,5.0\r\n";
        assert!(parse_position(line, CLIENT).is_some());
    }

    #[test]
    fn test_parse_position_wrong_field_count() {
        assert!(parse_position("XGPSAerofly FS 4,-122.5,45.5,3048.0,270.5", CLIENT).is_none());
        assert!(
            parse_position("XGPSAerofly FS 4,-122.5,45.5,3048.0,270.5,154.3,1.0", CLIENT).is_none()
        );
        assert!(parse_position("XGPSAerofly FS 4", CLIENT).is_none());
    }

    #[test]
    fn test_parse_position_non_numeric() {
        assert!(parse_position("XGPSAerofly FS 4,abc,45.5,3048.0,270.5,154.3", CLIENT).is_none());
        assert!(parse_position("XGPSAerofly FS 4,,45.5,3048.0,270.5,154.3", CLIENT).is_none());
        assert!(parse_position("XGPSAerofly FS 4,1.2.3,45.5,3048.0,270.5,154.3", CLIENT).is_none());
        assert!(parse_position("XGPSAerofly FS 4,1-2,45.5,3048.0,270.5,154.3", CLIENT).is_none());
    }

    #[test]
    fn test_parse_position_rejects_non_decimal_syntax() {
        assert!(parse_position("XGPSAerofly FS 4,1e3,45.5,3048.0,270.5,154.3", CLIENT).is_none());
        assert!(parse_position("XGPSAerofly FS 4,inf,45.5,3048.0,270.5,154.3", CLIENT).is_none());
        assert!(parse_position("XGPSAerofly FS 4,NaN,45.5,3048.0,270.5,154.3", CLIENT).is_none());
        assert!(parse_position("XGPSAerofly FS 4,+1,45.5,3048.0,270.5,154.3", CLIENT).is_none());
        assert!(parse_position("XGPSAerofly FS 4, 1,45.5,3048.0,270.5,154.3", CLIENT).is_none());
    }

    #[test]
    fn test_parse_position_rejects_overflow() {
        let huge = "9".repeat(400);
        let line = format!("XGPSAerofly FS 4,{},45.5,3048.0,270.5,154.3", huge);
        assert!(parse_position(&line, CLIENT).is_none());
    }

    #[test]
    fn test_parse_position_wrong_client() {
        let line = "XGPSX-Plane,-122.5,45.5,3048.0,270.5,154.3";
        assert!(parse_position(line, CLIENT).is_none());
        assert!(parse_position(line, "X-Plane").is_some());
    }

    #[test]
    fn test_parse_position_wrong_prefix() {
        assert!(parse_position("XATTAerofly FS 4,1,2,3,4,5", CLIENT).is_none());
        assert!(parse_position("xgpsAerofly FS 4,1,2,3,4,5", CLIENT).is_none());
        assert!(parse_position(" XGPSAerofly FS 4,1,2,3,4,5", CLIENT).is_none());
    }

    // ==================== XATT tests ====================

    #[test]
    fn test_parse_attitude() {
        let att = parse_attitude("XATTAerofly FS 4,45.5,5.2,-3.1", CLIENT).unwrap();

        assert_eq!(att.true_heading, 45.5);
        assert_eq!(att.pitch, 5.2);
        assert_eq!(att.roll, -3.1);
    }

    #[test]
    fn test_parse_attitude_wrong_field_count() {
        assert!(parse_attitude("XATTAerofly FS 4,45.5,5.2", CLIENT).is_none());
        assert!(parse_attitude("XATTAerofly FS 4,45.5,5.2,-3.1,0.0", CLIENT).is_none());
    }

    #[test]
    fn test_parse_attitude_non_numeric() {
        assert!(parse_attitude("XATTAerofly FS 4,north,5.2,-3.1", CLIENT).is_none());
    }

    // ==================== Dispatch tests ====================

    #[test]
    fn test_parse_line_dispatch() {
        assert!(matches!(
            parse_line("XGPSAerofly FS 4,1,2,3,4,5", CLIENT),
            Some(Datagram::Position(_))
        ));
        assert!(matches!(
            parse_line("XATTAerofly FS 4,1,2,3", CLIENT),
            Some(Datagram::Attitude(_))
        ));
        assert!(parse_line("XTRAFFICAerofly FS 4,1,2,3", CLIENT).is_none());
        assert!(parse_line("UNKN,some,data", CLIENT).is_none());
        assert!(parse_line("", CLIENT).is_none());
    }

    #[test]
    fn test_parse_datagram_invalid_utf8() {
        assert!(parse_datagram(&[0x58, 0x47, 0xff, 0xfe, 0x00], CLIENT).is_none());
    }

    #[test]
    fn test_parse_datagram_bytes() {
        let datagram = parse_datagram(b"XATTAerofly FS 4,180.0,0.0,0.0", CLIENT).unwrap();
        assert_eq!(
            datagram,
            Datagram::Attitude(AttitudeSample::new(180.0, 0.0, 0.0))
        );
    }
}
