//! Ratatui rendering for the three screens and the toast overlay.
//!
//! Everything here only reads app state, except the per-form scroll offset,
//! which is adjusted during draw to keep the focused field in view.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, ApplicationForm, OfferForm, Screen, SubmitPhase};
use crate::forms::{Field, FieldAccess, FieldKind, Form};
use crate::notify::{Toast, ToastKind};

const DASHBOARD_STATS: &[(&str, &str)] = &[
    ("Total Applications", "247"),
    ("Offer Letters Sent", "89"),
    ("Active Positions", "12"),
    ("Success Rate", "94%"),
];

pub fn draw(frame: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::Dashboard => draw_dashboard(frame),
        Screen::ApplicationForm => {
            if let Some(ApplicationForm {
                record,
                form,
                phase,
            }) = app.application.as_mut()
            {
                let submit_label = match phase {
                    SubmitPhase::Editing => "Submit Application",
                    _ => "Submitting Application...",
                };
                draw_form_screen(
                    frame,
                    "Internship Application",
                    "Fill out all sections to complete your application.",
                    form,
                    record,
                    Some(record.extra.skills.as_slice()),
                    submit_label,
                    *phase,
                );
            }
        }
        Screen::OfferLetterForm => {
            if let Some(OfferForm {
                record,
                form,
                phase,
            }) = app.offer.as_mut()
            {
                let submit_label = match phase {
                    SubmitPhase::Editing => "Generate Offer Letter",
                    _ => "Generating Offer Letter...",
                };
                draw_form_screen(
                    frame,
                    "Generate Offer Letter",
                    "Create a professional offer letter for the selected candidate.",
                    form,
                    record,
                    None,
                    submit_label,
                    *phase,
                );
            }
        }
    }

    if let Some(toast) = app.toast.visible() {
        draw_toast(frame, toast);
    }
}

fn draw_dashboard(frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(5), // stats
            Constraint::Min(7),    // action cards
            Constraint::Length(1), // help
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Internship Management",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Streamline your internship application and offer letter process",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let stat_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[1]);
    for ((label, value), area) in DASHBOARD_STATS.iter().zip(stat_areas.iter()) {
        let stat = Paragraph::new(vec![
            Line::from(Span::styled(
                *value,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(*label, Style::default().fg(Color::DarkGray))),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(stat, *area);
    }

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let apply = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Apply for Internship",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("  Submit a new internship application"),
        Line::from(""),
        Line::from(Span::styled(
            "  press a",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL))
    .wrap(Wrap { trim: false });
    frame.render_widget(apply, cards[0]);

    let offer = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Generate Offer Letter",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("  Create an offer letter for a selected candidate"),
        Line::from(""),
        Line::from(Span::styled(
            "  press o",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL))
    .wrap(Wrap { trim: false });
    frame.render_widget(offer, cards[1]);

    let help = Paragraph::new(" a/1:apply  o/2:offer letter  q:quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}

fn field_height(kind: FieldKind) -> u16 {
    match kind {
        FieldKind::Multiline => 5,
        FieldKind::Skills => 4,
        _ => 3,
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_form_screen<F, R>(
    frame: &mut Frame,
    title: &str,
    subtitle: &str,
    form: &mut Form<F>,
    record: &R,
    skills: Option<&[String]>,
    submit_label: &str,
    phase: SubmitPhase,
) where
    F: Copy + Eq,
    R: FieldAccess<Id = F>,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(8),    // fields
            Constraint::Length(3), // submit
            Constraint::Length(1), // help
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::DarkGray))),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    draw_fields(frame, chunks[1], form, record, skills);

    let submitting = phase != SubmitPhase::Editing;
    let submit_style = if submitting {
        Style::default().fg(Color::DarkGray)
    } else if form.submit_focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };
    let submit = Paragraph::new(submit_label)
        .style(submit_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if form.submit_focused && !submitting {
                    Color::Cyan
                } else {
                    Color::DarkGray
                })),
        );
    frame.render_widget(submit, chunks[2]);

    let help = Paragraph::new(
        " Tab:next  Shift-Tab:prev  Left/Right:cycle option  Ctrl-Enter:submit  Esc:back",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}

/// Per-field vertical extent: an optional section heading plus the block.
fn field_extents<F>(fields: &[Field<F>]) -> Vec<(u16, u16)> {
    let mut extents = Vec::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        let new_section = i == 0 || fields[i - 1].section != field.section;
        let heading = if new_section { 1 } else { 0 };
        extents.push((heading, field_height(field.kind)));
    }
    extents
}

fn draw_fields<F, R>(
    frame: &mut Frame,
    area: Rect,
    form: &mut Form<F>,
    record: &R,
    skills: Option<&[String]>,
) where
    F: Copy + Eq,
    R: FieldAccess<Id = F>,
{
    let extents = field_extents(&form.fields);

    // Keep the focused field (heading included) inside the viewport.
    let mut focused_top = 0u16;
    for (i, (heading, height)) in extents.iter().enumerate() {
        if i == form.focused {
            let bottom = focused_top + heading + height;
            if focused_top < form.scroll {
                form.scroll = focused_top;
            } else if bottom > form.scroll + area.height {
                form.scroll = bottom.saturating_sub(area.height);
            }
            break;
        }
        focused_top += heading + height;
    }

    let mut y = 0u16;
    for (i, field) in form.fields.iter().enumerate() {
        let (heading, height) = extents[i];
        let top = y;
        y += heading + height;

        // Fields clipped above or below the viewport are skipped whole; the
        // scroll adjustment above guarantees the focused one fits.
        if top < form.scroll {
            continue;
        }
        let view_top = top - form.scroll;
        if view_top >= area.height {
            break;
        }

        if heading == 1 {
            let heading_area = Rect {
                x: area.x,
                y: area.y + view_top,
                width: area.width,
                height: 1,
            };
            let heading_line = Paragraph::new(Span::styled(
                field.section,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(heading_line, heading_area);
        }

        let block_top = view_top + heading;
        if block_top + height > area.height {
            continue;
        }
        let field_area = Rect {
            x: area.x + 1,
            y: area.y + block_top,
            width: area.width.saturating_sub(2),
            height,
        };
        let focused = !form.submit_focused && i == form.focused;
        draw_field(frame, field, field_area, record, skills, focused);
    }
}

fn draw_field<F, R>(
    frame: &mut Frame,
    field: &Field<F>,
    area: Rect,
    record: &R,
    skills: Option<&[String]>,
    focused: bool,
) where
    F: Copy + Eq,
    R: FieldAccess<Id = F>,
{
    let border_color = if field.error.is_some() {
        Color::Red
    } else if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let title = if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title)
        .title_style(Style::default().fg(if focused { Color::Yellow } else { Color::White }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match field.kind {
        FieldKind::Select(_) | FieldKind::WorkModeSelect => {
            let value = record.get(field.id);
            let line = if value.is_empty() {
                Line::from(Span::styled(
                    "< choose >",
                    Style::default().fg(Color::DarkGray),
                ))
            } else {
                Line::from(format!("< {} >", value))
            };
            frame.render_widget(Paragraph::new(line), inner);
        }
        FieldKind::Skills => {
            let tags = skills.map(|s| s.join("  ")).unwrap_or_default();
            let tags_line = if tags.is_empty() {
                Line::from(Span::styled(
                    "(no skills added yet)",
                    Style::default().fg(Color::DarkGray),
                ))
            } else {
                Line::from(Span::styled(tags, Style::default().fg(Color::Magenta)))
            };
            let buffer_line = if field.buffer.is_empty() && !focused {
                Line::from(Span::styled(
                    field.placeholder,
                    Style::default().fg(Color::DarkGray),
                ))
            } else {
                Line::from(format!("+ {}", field.buffer))
            };
            frame.render_widget(Paragraph::new(vec![tags_line, buffer_line]), inner);
            if focused && inner.height > 1 {
                let cursor = field.buffer.len().min(field.cursor) as u16;
                frame.set_cursor_position((inner.x + 2 + cursor, inner.y + 1));
            }
        }
        _ => {
            let value = record.get(field.id);
            let text = if value.is_empty() && !focused {
                Paragraph::new(Span::styled(
                    field.placeholder,
                    Style::default().fg(Color::DarkGray),
                ))
            } else {
                Paragraph::new(value.clone()).wrap(Wrap { trim: false })
            };
            frame.render_widget(text, inner);
            if focused {
                // Cursor placement is only exact for single-line content;
                // wrapped multiline text parks it at the end of the last row.
                let cursor = value.len().min(field.cursor) as u16;
                let x = (inner.x + cursor % inner.width.max(1)).min(inner.x + inner.width);
                let y = inner.y + (cursor / inner.width.max(1)).min(inner.height.saturating_sub(1));
                frame.set_cursor_position((x, y));
            }
        }
    }

    if let Some(error) = &field.error {
        let error_area = Rect {
            x: area.x + 1,
            y: area.y + area.height - 1,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        let error_line =
            Paragraph::new(format!("! {}", error)).style(Style::default().fg(Color::Red));
        frame.render_widget(error_line, error_area);
    }
}

fn draw_toast(frame: &mut Frame, toast: &Toast) {
    let area = frame.area();
    let width = (toast.text.len() as u16 + 4).min(area.width.saturating_sub(4));
    let rect = Rect {
        x: area.width.saturating_sub(width + 2),
        y: 1,
        width,
        height: 3,
    };
    let (color, title) = match toast.kind {
        ToastKind::Success => (Color::Green, " Success "),
        ToastKind::Error => (Color::Red, " Error "),
    };
    let body = Paragraph::new(toast.text.clone())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );
    frame.render_widget(ratatui::widgets::Clear, rect);
    frame.render_widget(body, rect);
}
