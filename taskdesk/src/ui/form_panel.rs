//! Creation form rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use taskdesk_proto::FieldErrors;

use super::theme;
use crate::app::App;
use crate::form::{self, Field, Focus, FormController};

/// Rows used by the description editor, borders included.
const DESCRIPTION_HEIGHT: u16 = 6;

/// Render the form with its errors and submit control.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(Span::styled(
            " Create New Task ",
            theme::panel_title(theme::FORM_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::normal());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let errors = app.session.errors();
    let general = form::general_error(errors);
    let banner_height = u16::from(general.is_some());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Length(3),
            Constraint::Length(DESCRIPTION_HEIGHT),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    if let Some(message) = general {
        let banner = Paragraph::new(Line::from(Span::raw(format!(" {message} "))))
            .style(theme::error_banner());
        frame.render_widget(banner, chunks[0]);
    }

    render_text_field(frame, chunks[1], &app.form, errors, Field::Title);
    render_text_field(frame, chunks[2], &app.form, errors, Field::Description);
    render_status(frame, chunks[3], &app.form, errors);
    render_text_field(frame, chunks[4], &app.form, errors, Field::DueDate);
    render_submit(frame, chunks[5], &app.form, app.is_loading());
}

/// Bordered block labelled with the field name, error on the bottom border.
fn field_block(field: Field, focused: bool, errors: &FieldErrors) -> Block<'static> {
    let label = if field.is_required() {
        format!(" {} * ", field.label())
    } else {
        format!(" {} ", field.label())
    };
    let error = form::field_error(errors, field);
    let block = Block::default()
        .title(Span::styled(label, theme::border(focused)))
        .borders(Borders::ALL)
        .border_style(if error.is_some() {
            theme::error()
        } else {
            theme::border(focused)
        });
    match error {
        Some(message) => block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            theme::error(),
        ))),
        None => block,
    }
}

fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    form: &FormController,
    errors: &FieldErrors,
    field: Field,
) {
    let focused = form.focus() == Focus::Field(field);
    let value = form.draft().text(field).unwrap_or_default();

    let lines: Vec<Line> = if value.is_empty() && !focused {
        vec![Line::from(Span::styled(field.placeholder(), theme::placeholder()))]
    } else {
        let mut display = value.to_string();
        if focused {
            let at = display
                .char_indices()
                .nth(form.cursor())
                .map_or(display.len(), |(i, _)| i);
            display.insert(at, '█');
        }
        display
            .split('\n')
            .map(|line| Line::from(Span::styled(line.to_string(), theme::normal())))
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(field_block(field, focused, errors));
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame, area: Rect, form: &FormController, errors: &FieldErrors) {
    let focused = form.focus() == Focus::Field(Field::Status);
    let status = form.draft().status;

    let arrow = if focused {
        theme::highlighted()
    } else {
        theme::dimmed()
    };
    let line = Line::from(vec![
        Span::styled("◀ ", arrow),
        Span::styled(format!(" {} ", status.label()), theme::status_badge(status)),
        Span::styled(" ▶", arrow),
    ]);

    let paragraph = Paragraph::new(line).block(field_block(Field::Status, focused, errors));
    frame.render_widget(paragraph, area);
}

fn render_submit(frame: &mut Frame, area: Rect, form: &FormController, is_loading: bool) {
    let focused = form.focus() == Focus::Submit;
    let label = format!("[ {} ]", form::submit_label(is_loading));
    let paragraph = Paragraph::new(Line::from(Span::styled(
        label,
        theme::button(focused, is_loading),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
