//! Presentation layer for the run command.
//!
//! The poll loop hands each presenter a [`PanelView`] once per tick and asks
//! it for pending user input. Two presenters exist: the full-screen
//! [`Dashboard`] and the line-oriented [`TextPresenter`] used when stdout is
//! not a terminal.

pub mod dashboard;
pub mod panel;
pub mod text;

use std::io;

use skytrack::flight::StatisticsReport;
use skytrack::telemetry::TelemetrySnapshot;

pub use dashboard::Dashboard;
pub use text::TextPresenter;

/// User requests raised by a presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Stop the receiver and exit.
    Quit,
    /// Clear derived flight statistics.
    ResetStatistics,
    /// Clear the recorded trail.
    ClearPath,
    /// Switch between imperial and metric units.
    ToggleUnits,
}

/// Everything a presenter needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct PanelView<'a> {
    pub snapshot: &'a TelemetrySnapshot,
    pub report: &'a StatisticsReport,
    /// UDP port the receiver is bound to.
    pub port: u16,
}

/// A sink for poll-loop frames.
pub trait Presenter {
    /// Draw the current frame.
    fn render(&mut self, view: &PanelView<'_>) -> io::Result<()>;

    /// Return the next pending user request without blocking.
    fn poll_event(&mut self) -> io::Result<Option<UiEvent>>;
}
