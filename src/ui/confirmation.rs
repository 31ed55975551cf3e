//! Submission confirmation view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let Some(submission) = app.last_submission() else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "✓ Application submitted",
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(submission.wizard_title),
        Line::from(""),
        Line::from(vec![
            Span::styled("Reference number: ", Style::default().fg(palette.muted)),
            Span::styled(
                submission.reference.as_str(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Submitted: ", Style::default().fg(palette.muted)),
            Span::raw(
                submission
                    .submitted_at
                    .with_timezone(&chrono::Local)
                    .format("%d %b %Y %H:%M")
                    .to_string(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Keep the reference number. You will need it to follow up.",
            Style::default().fg(palette.muted),
        )),
    ];

    let answered: Vec<Line> = submission
        .form
        .sections()
        .iter()
        .filter_map(|section| {
            let filled = section.fields.iter().filter(|f| !f.value.is_empty()).count();
            (filled > 0).then(|| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<16}", section_heading(section.name)),
                        Style::default().fg(palette.muted),
                    ),
                    Span::raw(format!("{filled} of {} answered", section.fields.len())),
                ])
            })
        })
        .collect();
    if !answered.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Answers",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(answered);
    }

    if let Some(pass) = app.session.pass_number().filter(|_| submission.wizard_id == "sevis_pass") {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Your SEVIS Pass {pass} is active."),
            Style::default().fg(palette.success),
        )));
    }
    if let Some(service) = app.resume_service() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Press Enter to continue to {}", service.title()),
            Style::default().fg(palette.text),
        )));
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.success)),
    );
    frame.render_widget(panel, area);
}

/// `next_of_kin` -> `Next of kin`
fn section_heading(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_heading() {
        assert_eq!(section_heading("declaration"), "Declaration");
        assert_eq!(section_heading("previous_passport"), "Previous passport");
        assert_eq!(section_heading(""), "");
    }
}
