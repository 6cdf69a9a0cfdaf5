//! Confirmation view for a created task.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::theme;
use crate::confirmation::{self, Confirmation, DescriptionText};

/// Width of the label column.
const LABEL_WIDTH: usize = 13;

fn row<'a>(label: &'a str, value: Vec<Span<'a>>) -> Line<'a> {
    let mut spans = vec![Span::styled(format!("{label:<width$}", width = LABEL_WIDTH), theme::dimmed())];
    spans.extend(value);
    Line::from(spans)
}

/// Render the confirmation of `view`.
pub fn render(frame: &mut Frame, area: Rect, view: &Confirmation) {
    let description = match &view.description {
        DescriptionText::Text(text) => Span::styled(text.as_str(), theme::normal()),
        DescriptionText::Placeholder => {
            Span::styled(confirmation::NO_DESCRIPTION, theme::placeholder())
        }
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("✓ {}", confirmation::HEADING),
            theme::panel_title(theme::SUCCESS),
        )),
        Line::from(Span::styled(confirmation::SUBHEADING, theme::dimmed())),
        Line::default(),
        row("Task ID", vec![Span::styled(view.id_label.as_str(), theme::bold())]),
        row("Title", vec![Span::styled(view.title.as_str(), theme::normal())]),
        row("Description", vec![description]),
        row(
            "Status",
            vec![Span::styled(
                format!(" {} ", view.badge.label),
                theme::status_badge(view.badge.status),
            )],
        ),
        row("Due Date", vec![Span::styled(view.due.as_str(), theme::normal())]),
        row("Created", vec![Span::styled(view.created.as_str(), theme::normal())]),
        Line::default(),
        Line::from(Span::styled(
            format!("[ {} ]", confirmation::CREATE_ANOTHER),
            theme::button(true, false),
        ))
        .alignment(Alignment::Center),
    ];

    let block = Block::default()
        .title(Span::styled(
            " Task Created ",
            theme::panel_title(theme::CONFIRMATION_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::normal().fg(theme::SUCCESS));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}
