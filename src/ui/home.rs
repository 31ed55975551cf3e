//! Home view

use crate::app::App;
use crate::services;
use crate::state::HomeAction;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let greeting = match app.session.user() {
        Some(user) => format!("Welcome back, {user}"),
        None => "Welcome to the SEVIS Portal".to_string(),
    };
    let standing = if app.session.is_elevated() {
        Span::styled(
            "Your SEVIS Pass is active. Every service is open to you.",
            Style::default().fg(palette.success),
        )
    } else {
        Span::styled(
            "Some services need a verified SEVIS Pass before you can apply.",
            Style::default().fg(palette.muted),
        )
    };
    let intro = Paragraph::new(vec![
        Line::from(Span::styled(
            greeting,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Government services for Papua New Guinea, in one place."),
        Line::from(Span::styled(
            format!("{} services · one verified identity · no queues", services::catalog().len()),
            Style::default().fg(palette.info),
        )),
        Line::from(standing),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(palette.muted)));
    frame.render_widget(intro, chunks[0]);

    let items: Vec<ListItem> = HomeAction::ALL
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let is_selected = i == app.state.selected_index;
            let marker = if is_selected { "▸ " } else { "  " };
            let title_style = if is_selected {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            ListItem::new(vec![
                Line::from(Span::styled(format!("{marker}{}", action.label()), title_style)),
                Line::from(Span::styled(
                    format!("  {}", action.description()),
                    Style::default().fg(palette.muted),
                )),
                Line::from(""),
            ])
        })
        .collect();

    frame.render_widget(
        List::new(items).block(Block::default().title(" Get started ")),
        chunks[1],
    );
}
