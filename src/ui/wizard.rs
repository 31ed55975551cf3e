//! Wizard view: progress, the current step, and what it still needs

use super::forms::{draw_field, field_height};
use super::theme::Palette;
use crate::app::App;
use crate::state::WizardScreen;
use crate::wizard::{
    FieldPath, ProgressSnapshot, SessionStatus, StepKind, StepVisual, Tone, WizardController,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let Some(wizard) = app.wizard.as_ref() else {
        return;
    };

    let unmet = wizard.unmet_requirements();
    let unmet_height = if unmet.is_empty() || wizard.is_stage_pending() {
        0
    } else {
        unmet.len().min(4) as u16 + 1
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title + gauge
            Constraint::Length(1),            // Step strip
            Constraint::Length(3),            // Step heading
            Constraint::Min(0),               // Body
            Constraint::Length(unmet_height), // Missing items
        ])
        .split(area);

    let progress = ProgressSnapshot::of(wizard);
    draw_progress(frame, chunks[0], chunks[1], wizard, &progress, &palette);
    draw_step_heading(frame, chunks[2], wizard, &palette);

    let screen = &app.state.wizard_screen;
    match &wizard.current_step().kind {
        StepKind::Form { fields } if wizard.is_final_step() => {
            draw_review_with_fields(frame, chunks[3], wizard, fields, screen, &palette)
        }
        StepKind::Form { fields } => draw_fields(frame, chunks[3], wizard, fields, screen, &palette),
        StepKind::Menu { field, options } => {
            let chosen = wizard.form().text(*field);
            let items: Vec<ListItem> = options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let is_selected = i == screen.menu_index;
                    let style = if is_selected {
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(palette.text)
                    };
                    let check = if option.value == chosen { " ✓" } else { "" };
                    ListItem::new(vec![
                        Line::from(Span::styled(
                            format!("{}{}{check}", if is_selected { "▸ " } else { "  " }, option.label),
                            style,
                        )),
                        Line::from(Span::styled(
                            format!("    {}", option.description),
                            Style::default().fg(palette.muted),
                        )),
                        Line::from(""),
                    ])
                })
                .collect();
            frame.render_widget(List::new(items), chunks[3]);
        }
        StepKind::Verification(stage) => {
            let mut lines = Vec::new();
            match wizard.pending_ticket() {
                Some(ticket) => {
                    let tick = app
                        .stage_elapsed()
                        .map(|elapsed| (elapsed.as_millis() / 100) as usize)
                        .unwrap_or(0);
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{} ", SPINNER[tick % SPINNER.len()]),
                            Style::default().fg(palette.accent),
                        ),
                        Span::styled(
                            format!("{}…", stage.kind.label()),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]));
                    let attempt = match stage.max_attempts {
                        Some(max) => format!("Attempt {} of {max}", ticket.attempt),
                        None => format!("Attempt {}", ticket.attempt),
                    };
                    lines.push(Line::from(Span::styled(
                        attempt,
                        Style::default().fg(palette.muted),
                    )));
                }
                None => lines.push(Line::from(Span::styled(
                    "Starting…",
                    Style::default().fg(palette.muted),
                ))),
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press Esc to cancel",
                Style::default().fg(palette.muted),
            )));
            frame.render_widget(Paragraph::new(lines), chunks[3]);
        }
        StepKind::Outcome {
            tone,
            message,
            shows,
            retry,
        } => {
            let color = match tone {
                Tone::Success => palette.success,
                Tone::Failure => palette.failure,
                Tone::Info => palette.info,
            };
            let mut lines = vec![Line::from(Span::styled(
                *message,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))];
            if let Some(path) = shows {
                let label = wizard
                    .definition()
                    .field_spec(*path)
                    .map(|spec| spec.label)
                    .unwrap_or_default();
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled(format!("{label}: "), Style::default().fg(palette.muted)),
                    Span::styled(
                        wizard.form().text(*path).to_string(),
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            if let Some(result) = wizard.last_stage_result() {
                if !result.is_success() && !result.detail.is_empty() {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        result.detail.clone(),
                        Style::default().fg(palette.muted),
                    )));
                }
            }
            if retry.is_some() {
                lines.push(Line::from(""));
                let hint = match wizard.retry_budget().and_then(|b| b.remaining()) {
                    Some(0) => "No attempts left. Press Enter to continue another way.".to_string(),
                    Some(1) => "Press r to try again (1 attempt left)".to_string(),
                    Some(n) => format!("Press r to try again ({n} attempts left)"),
                    None => "Press r to try again".to_string(),
                };
                lines.push(Line::from(Span::styled(hint, Style::default().fg(palette.text))));
            }
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[3]);
        }
        StepKind::Review => draw_review(frame, chunks[3], wizard, &palette),
    }

    if unmet_height > 0 {
        let mut lines = vec![Line::from(Span::styled(
            "Still needed:",
            Style::default().fg(palette.info),
        ))];
        lines.extend(unmet.iter().take(4).map(|item| {
            Line::from(Span::styled(
                format!("  • {item}"),
                Style::default().fg(palette.muted),
            ))
        }));
        frame.render_widget(Paragraph::new(lines), chunks[4]);
    }
}

fn draw_progress(
    frame: &mut Frame,
    title_area: Rect,
    strip_area: Rect,
    wizard: &WizardController,
    progress: &ProgressSnapshot,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(title_area);

    let mut title = vec![
        Span::styled(
            wizard.definition().title,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", progress.label()),
            Style::default().fg(palette.muted),
        ),
    ];
    if wizard.status() == SessionStatus::InProgress {
        title.push(Span::styled("  · draft", Style::default().fg(palette.info)));
    }
    let title = Line::from(title);
    frame.render_widget(Paragraph::new(title), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(palette.accent).bg(palette.bar_bg))
        .percent(progress.percent.min(100))
        .label(format!("{}%", progress.percent));
    frame.render_widget(gauge, rows[1]);

    let mut spans = Vec::new();
    for (i, marker) in progress.steps.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(palette.muted)));
        }
        let span = match marker.visual {
            StepVisual::Completed => {
                Span::styled(format!("✓ {}", marker.title), Style::default().fg(palette.success))
            }
            StepVisual::Active => Span::styled(
                format!("{} {}", marker.icon, marker.title),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            StepVisual::Pending => Span::styled(marker.title, Style::default().fg(palette.muted)),
        };
        spans.push(span);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), strip_area);
}

fn draw_step_heading(frame: &mut Frame, area: Rect, wizard: &WizardController, palette: &Palette) {
    let step = wizard.current_step();
    let mut lines = vec![Line::from(Span::styled(
        format!("{} {}", step.icon, step.title),
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD),
    ))];
    if !step.description.is_empty() {
        lines.push(Line::from(Span::styled(
            step.description,
            Style::default().fg(palette.muted),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette.muted)),
        ),
        area,
    );
}

/// First field to draw so the focused one stays on screen
fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    let mut start = 0;
    while start < active && heights[start..=active].iter().sum::<u16>() > available {
        start += 1;
    }
    start
}

fn draw_fields(
    frame: &mut Frame,
    area: Rect,
    wizard: &WizardController,
    fields: &[FieldPath],
    screen: &WizardScreen,
    palette: &Palette,
) {
    let specs: Vec<_> = fields
        .iter()
        .filter_map(|path| wizard.definition().field_spec(*path).map(|spec| (*path, *spec)))
        .collect();
    let heights: Vec<u16> = specs.iter().map(|(_, spec)| field_height(spec)).collect();
    let active = screen.active_field.min(specs.len().saturating_sub(1));
    let start = first_visible(&heights, active, area.height);

    let mut y = area.y;
    for (i, (path, spec)) in specs.iter().enumerate().skip(start) {
        let height = heights[i];
        if y + height > area.y + area.height {
            break;
        }
        let Some(value) = wizard.form().get(*path) else {
            continue;
        };
        let field_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        draw_field(frame, field_area, spec, value, i == screen.active_field, palette);
        y += height;
    }
}

/// Every filled answer grouped by section
fn review_lines<'a>(wizard: &'a WizardController, palette: &Palette) -> Vec<Line<'a>> {
    let definition = wizard.definition();
    let mut lines = Vec::new();
    for section in wizard.form().sections() {
        let filled: Vec<_> = section
            .fields
            .iter()
            .filter(|entry| !entry.value.is_empty())
            .collect();
        if filled.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(
            definition.section_title(section.name),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )));
        for entry in filled {
            let label = definition
                .field_spec(FieldPath::new(section.name, entry.name))
                .map(|spec| spec.label)
                .unwrap_or(entry.name);
            lines.push(Line::from(vec![
                Span::styled(format!("  {label}: "), Style::default().fg(palette.muted)),
                Span::styled(entry.value.display_value(), Style::default().fg(palette.text)),
            ]));
        }
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing entered yet",
            Style::default().fg(palette.muted),
        )));
    }
    lines
}

fn draw_review(frame: &mut Frame, area: Rect, wizard: &WizardController, palette: &Palette) {
    let summary = Paragraph::new(review_lines(wizard, palette))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Your answers ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.muted)),
        );
    frame.render_widget(summary, area);
}

fn draw_review_with_fields(
    frame: &mut Frame,
    area: Rect,
    wizard: &WizardController,
    fields: &[FieldPath],
    screen: &WizardScreen,
    palette: &Palette,
) {
    let fields_height: u16 = fields
        .iter()
        .filter_map(|path| wizard.definition().field_spec(*path))
        .map(field_height)
        .sum();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(fields_height)])
        .split(area);
    draw_review(frame, chunks[0], wizard, palette);
    draw_fields(frame, chunks[1], wizard, fields, screen, palette);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_keeps_active_on_screen() {
        let heights = [3, 3, 5, 3];
        assert_eq!(first_visible(&heights, 0, 6), 0);
        assert_eq!(first_visible(&heights, 1, 6), 0);
        assert_eq!(first_visible(&heights, 2, 9), 1);
        assert_eq!(first_visible(&heights, 3, 8), 2);
    }

    #[test]
    fn test_first_visible_with_tiny_area() {
        let heights = [3, 3];
        assert_eq!(first_visible(&heights, 1, 1), 1);
    }
}
