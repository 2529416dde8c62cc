//! SkyTrack - live flight-simulator telemetry and flight statistics.
//!
//! The library has two halves that meet at a polled snapshot:
//!
//! - [`telemetry`] listens for `XGPS`/`XATT` UDP broadcasts on a background
//!   task and keeps the latest position and attitude samples
//! - [`flight`] turns successive position fixes into flight time, distance,
//!   speed and altitude statistics plus a breadcrumb trail
//!
//! ```ignore
//! use skytrack::flight::FlightTracker;
//! use skytrack::telemetry::TelemetryReceiver;
//!
//! let mut receiver = TelemetryReceiver::with_defaults()?;
//! let mut tracker = FlightTracker::default();
//!
//! let mut ticker = tokio::time::interval(std::time::Duration::from_millis(100));
//! loop {
//!     ticker.tick().await;
//!     let snapshot = receiver.snapshot();
//!     tracker.ingest(&snapshot);
//!     println!("{}", tracker.get_statistics());
//! }
//! ```

pub mod config;
pub mod flight;
pub mod geo;
pub mod logging;
pub mod telemetry;
pub mod units;

/// Version of the SkyTrack library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
