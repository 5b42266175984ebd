//! UI rendering
//!
//! Pure rendering functions that turn App state into ratatui widgets.

mod console;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use yowire_app::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const CONSOLE_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;
    const HINTS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(CONSOLE_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(HINTS_HEIGHT),
        ])
        .split(frame.area());

    let [console_area, status_area, hints_area] = chunks.as_ref() else {
        return;
    };

    console::render(frame, app, *console_area);
    status::render(frame, app, *status_area);
    status::render_hints(frame, *hints_area);
}
