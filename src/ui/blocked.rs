//! Shown in place of a wizard that needs a SEVIS Pass

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let Some(notice) = app.blocked.as_ref() else {
        return;
    };

    let exits = notice.exits();
    let mut constraints = vec![Constraint::Length(7)];
    constraints.extend(exits.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));
    let width = area.width.min(60);
    let column = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(column);

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            "🔒 Verification required",
            Style::default()
                .fg(palette.info)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(notice.message()),
        Line::from(""),
        Line::from(Span::styled(
            "Enroll once with your NID and a face check, then come back here.",
            Style::default().fg(palette.muted),
        )),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(text, chunks[0]);

    for (i, exit) in exits.iter().enumerate() {
        render_button(
            frame,
            chunks[i + 1],
            exit.label(),
            i == app.state.selected_index,
            true,
            &palette,
        );
    }
}
