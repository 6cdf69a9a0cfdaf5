//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};
use taskdesk_proto::TaskStatus;

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success indicator color.
pub const SUCCESS: Color = Color::Green;

/// In-flight indicator color.
pub const WARNING: Color = Color::Yellow;

/// Validation error color.
pub const ERROR: Color = Color::Red;

/// Panel title color for the form.
pub const FORM_TITLE: Color = Color::Cyan;

/// Panel title color for the confirmation.
pub const CONFIRMATION_TITLE: Color = Color::Green;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (placeholders, hints).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Border style for a control, depending on focus.
#[must_use]
pub fn border(focused: bool) -> Style {
    if focused { highlighted() } else { normal() }
}

/// Field error text.
#[must_use]
pub fn error() -> Style {
    Style::default().fg(ERROR)
}

/// General error banner (white on red).
#[must_use]
pub fn error_banner() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(ERROR)
        .add_modifier(Modifier::BOLD)
}

/// Empty-value placeholder (italic, dimmed).
#[must_use]
pub fn placeholder() -> Style {
    dimmed().add_modifier(Modifier::ITALIC)
}

/// Submit control style.
#[must_use]
pub fn button(focused: bool, disabled: bool) -> Style {
    if disabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else if focused {
        Style::default()
            .fg(Color::Black)
            .bg(HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        bold()
    }
}

/// Badge color for a status.
#[must_use]
pub const fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::Yellow,
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::Completed => Color::Green,
    }
}

/// Badge style for a status (black on the status color).
#[must_use]
pub fn status_badge(status: TaskStatus) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(status_color(status))
        .add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
