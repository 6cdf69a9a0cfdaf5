//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::App;
use crate::form::{Field, Focus};

/// Key hints for the current screen.
fn help_text(app: &App) -> &'static str {
    if app.session.created().is_some() {
        return "Enter/n: create another | Esc: quit";
    }
    match app.form.focus() {
        Focus::Field(Field::Description) => {
            "Enter: new line | Ctrl+S: submit | Tab: next field | Esc: quit"
        }
        Focus::Field(Field::Status) => "←→: change status | Enter: submit | Tab: next field | Esc: quit",
        Focus::Field(Field::DueDate) => {
            "YYYY-MM-DDTHH:MM | Enter: submit | Tab: next field | Esc: quit"
        }
        Focus::Field(Field::Title) | Focus::Submit => "Enter: submit | Tab: next field | Esc: quit",
    }
}

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (dot_color, status_text) = if app.is_loading() {
        (theme::WARNING, "Submitting")
    } else {
        (theme::SUCCESS, "Ready")
    };

    let status_line = Line::from(vec![
        Span::styled(concat!("TaskDesk v", env!("CARGO_PKG_VERSION")), theme::bold()),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(dot_color)),
        Span::raw(format!(" {status_text} → {}", app.endpoint)),
        Span::raw(" | "),
        Span::styled(help_text(app), theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
