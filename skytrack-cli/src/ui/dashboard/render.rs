//! Dashboard rendering.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (3 lines)                                        │
//! ├────────────────────────────┬────────────────────────────┤
//! │ Aircraft (9 lines)         │ Flight Statistics          │
//! ├────────────────────────────┴────────────────────────────┤
//! │ Key help (1 line)                                       │
//! └─────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use skytrack::units::format_hms;

use crate::ui::panel::{self, LinkStatus};
use crate::ui::PanelView;

/// Render the dashboard to the frame.
pub fn render_ui(frame: &mut Frame, view: &PanelView<'_>, uptime: Duration) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(11), // Aircraft + statistics
            Constraint::Length(1),  // Key help
            Constraint::Min(0),     // Padding
        ])
        .split(frame.area());

    render_header(frame, chunks[0], view, uptime);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_aircraft(frame, columns[0], view);
    render_statistics(frame, columns[1], view);
    render_help(frame, chunks[2]);
}

fn section_block(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color),
        ))
}

fn render_header(frame: &mut Frame, area: Rect, view: &PanelView<'_>, uptime: Duration) {
    let status = LinkStatus::from_snapshot(view.snapshot);
    let status_color = match status {
        LinkStatus::Connected => Color::Green,
        LinkStatus::Waiting => Color::Yellow,
        LinkStatus::Lost { .. } => Color::Red,
    };

    let line = Line::from(vec![
        Span::styled(
            format!("SkyTrack v{}", skytrack::VERSION),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("● ", Style::default().fg(status_color)),
        Span::styled(status.describe(view.port), Style::default().fg(status_color)),
        Span::styled(
            format!("  Uptime: {}", format_hms(uptime)),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_aircraft(frame: &mut Frame, area: Rect, view: &PanelView<'_>) {
    let block = section_block("Aircraft", Color::Magenta);

    let text: Vec<Line> = match panel::live_samples(view.snapshot) {
        Some((position, attitude)) => panel::info_rows(&position, &attitude, view.report.units)
            .into_iter()
            .map(Line::from)
            .collect(),
        None => vec![Line::from(Span::styled(
            panel::WAITING_MESSAGE,
            Style::default().fg(Color::Yellow),
        ))],
    };

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_statistics(frame: &mut Frame, area: Rect, view: &PanelView<'_>) {
    let block = section_block("Flight Statistics", Color::Blue);
    let text: Vec<Line> = panel::statistics_rows(view.report)
        .into_iter()
        .map(Line::from)
        .collect();

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::DarkGray);

    let line = Line::from(vec![
        Span::styled(" q", key),
        Span::styled(" quit  ", label),
        Span::styled("r", key),
        Span::styled(" reset statistics  ", label),
        Span::styled("c", key),
        Span::styled(" clear trail  ", label),
        Span::styled("u", key),
        Span::styled(" toggle units", label),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
