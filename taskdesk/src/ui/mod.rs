//! Terminal UI rendering.

pub mod confirmation;
pub mod form_panel;
pub mod status_bar;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    match app.confirmation() {
        Some(view) => confirmation::render(frame, main_chunks[0], &view),
        None => form_panel::render(frame, main_chunks[0], app),
    }

    status_bar::render(frame, main_chunks[1], app);
}
