//! Full-screen terminal dashboard.
//!
//! Owns the terminal while alive: raw mode and the alternate screen are
//! entered on construction and left again in [`Dashboard::restore`], which
//! also runs on drop.
//!
//! # Module Structure
//!
//! - `render` - Layout and section rendering

mod render;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::{PanelView, Presenter, UiEvent};

/// The main dashboard UI.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    start_time: Instant,
    restored: bool,
}

impl Dashboard {
    /// Take over the terminal.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            start_time: Instant::now(),
            restored: false,
        })
    }

    /// Restore terminal to normal state.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Presenter for Dashboard {
    fn render(&mut self, view: &PanelView<'_>) -> io::Result<()> {
        let uptime = self.start_time.elapsed();
        self.terminal.draw(|frame| render::render_ui(frame, view, uptime))?;
        Ok(())
    }

    /// Check for key presses (non-blocking).
    ///
    /// Raw mode swallows SIGINT, so Ctrl+C arrives here as a key event.
    fn poll_event(&mut self) -> io::Result<Option<UiEvent>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(ui_event) = event_for_key(key) {
                    return Ok(Some(ui_event));
                }
            }
        }
        Ok(None)
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Map a key press to a dashboard request.
fn event_for_key(key: KeyEvent) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UiEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiEvent::ResetStatistics),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(UiEvent::ClearPath),
        KeyCode::Char('u') | KeyCode::Char('U') => Some(UiEvent::ToggleUnits),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_bindings() {
        let none = KeyModifiers::NONE;
        assert_eq!(event_for_key(press(KeyCode::Char('q'), none)), Some(UiEvent::Quit));
        assert_eq!(event_for_key(press(KeyCode::Esc, none)), Some(UiEvent::Quit));
        assert_eq!(
            event_for_key(press(KeyCode::Char('r'), none)),
            Some(UiEvent::ResetStatistics)
        );
        assert_eq!(event_for_key(press(KeyCode::Char('c'), none)), Some(UiEvent::ClearPath));
        assert_eq!(event_for_key(press(KeyCode::Char('u'), none)), Some(UiEvent::ToggleUnits));
        assert_eq!(event_for_key(press(KeyCode::Char('x'), none)), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = press(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(event_for_key(key), Some(UiEvent::Quit));
    }

    #[test]
    fn test_release_is_ignored() {
        let key = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(event_for_key(key), None);
    }
}
