//! Status bar
//!
//! Connection state, running counters, and key hints.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use yowire_app::{App, ConnectionState};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let connection_status = match app.connection_state() {
        ConnectionState::Disconnected => {
            Span::styled("Disconnected", Style::default().fg(Color::Red))
        },
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionState::Connected => Span::styled(
            format!("Connected ({})", app.server_addr()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let stats = app.stats();
    let stats_info = format!(
        " | Yo: {} | Howdy: {} | Streak: {}",
        stats.yo_count(),
        stats.howdy_count(),
        stats.yo_streak()
    );

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::styled(stats_info, Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}

/// Render the key hints line.
pub fn render_hints(frame: &mut Frame, area: Rect) {
    let hints = Line::from(Span::styled(
        " y: send Yo | h: send Howdy | c: connect | d: disconnect | q: quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(hints), area);
}
