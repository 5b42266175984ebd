//! Console pane
//!
//! Displays the bounded line log, tail-anchored.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem},
};
use yowire_app::App;

const BORDER_SIZE: u16 = 2;

/// Render the console pane.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Yo ");

    let items: Vec<ListItem> = if app.console().is_empty() {
        vec![ListItem::new(Line::styled("Not connected", Style::default().fg(Color::DarkGray)))]
    } else {
        app.console().lines().map(|line| ListItem::new(Line::raw(line.to_string()))).collect()
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
