//! Plain-text presenter for non-interactive output.
//!
//! Prints the info block and statistics at most once per interval, and
//! whenever the link status changes. Never produces input events; Ctrl+C is
//! handled by the signal task in the run command.

use std::io::{self, Write};
use std::mem;
use std::time::{Duration, Instant};

use super::panel::{self, LinkStatus};
use super::{PanelView, Presenter, UiEvent};

/// Default time between printed frames.
pub const DEFAULT_PRINT_INTERVAL: Duration = Duration::from_secs(1);

/// Line-oriented presenter writing to any `Write` sink.
pub struct TextPresenter<W: Write> {
    out: W,
    interval: Duration,
    last_print: Option<Instant>,
    last_status: Option<LinkStatus>,
}

impl TextPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), DEFAULT_PRINT_INTERVAL)
    }
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W, interval: Duration) -> Self {
        Self {
            out,
            interval,
            last_print: None,
            last_status: None,
        }
    }

    fn is_due(&self, now: Instant, status: LinkStatus) -> bool {
        let status_changed = match self.last_status {
            Some(last) => mem::discriminant(&last) != mem::discriminant(&status),
            None => true,
        };
        let interval_passed = match self.last_print {
            Some(last) => now.duration_since(last) >= self.interval,
            None => true,
        };
        status_changed || interval_passed
    }

    /// Render at an explicit instant.
    pub fn render_at(&mut self, view: &PanelView<'_>, now: Instant) -> io::Result<()> {
        let status = LinkStatus::from_snapshot(view.snapshot);
        if !self.is_due(now, status) {
            return Ok(());
        }
        self.last_print = Some(now);
        self.last_status = Some(status);

        writeln!(self.out, "[{}]", status.describe(view.port))?;
        let info = panel::info_text(view.snapshot, view.report.units);
        write!(self.out, "{}", info)?;
        if !info.ends_with('\n') {
            writeln!(self.out)?;
        }
        writeln!(self.out, "{}", view.report)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn render(&mut self, view: &PanelView<'_>) -> io::Result<()> {
        self.render_at(view, Instant::now())
    }

    fn poll_event(&mut self) -> io::Result<Option<UiEvent>> {
        Ok(None)
    }
}
