//! Services directory view

use crate::app::App;
use crate::services::{self, Category};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    // Filter tabs
    let mut tabs = vec![Span::styled(" Filter: ", Style::default().fg(palette.muted))];
    let all = std::iter::once((None, "All")).chain(Category::ALL.iter().map(|c| (Some(*c), c.label())));
    for (category, label) in all {
        let style = if category == app.state.category_filter {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.muted)
        };
        tabs.push(Span::styled(label, style));
        tabs.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(tabs)), chunks[0]);

    let listed = services::filtered(app.state.category_filter);
    if listed.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No services in this category",
                Style::default().fg(palette.muted),
            )),
            chunks[1],
        );
        return;
    }

    let elevated = app.session.is_elevated();
    let items: Vec<ListItem> = listed
        .iter()
        .enumerate()
        .map(|(i, service)| {
            let is_selected = i == app.state.selected_index;
            let title_style = if is_selected {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };

            let mut title = vec![
                Span::styled(if is_selected { "▸ " } else { "  " }, title_style),
                Span::styled(service.title, title_style),
                Span::styled(
                    format!("  [{}]", service.category.label()),
                    Style::default().fg(palette.muted),
                ),
            ];
            if service.requires_elevation {
                let (badge, color) = if elevated {
                    ("  🛡 SEVIS Pass", palette.success)
                } else {
                    ("  🔒 SEVIS Pass required", palette.info)
                };
                title.push(Span::styled(badge, Style::default().fg(color)));
            }

            ListItem::new(vec![
                Line::from(title),
                Line::from(Span::styled(
                    format!("    {} · Fee: {}", service.summary, service.fee),
                    Style::default().fg(palette.muted),
                )),
            ])
        })
        .collect();

    let mut list_state = ListState::default().with_selected(Some(app.state.selected_index));
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(palette.muted))
            .title(format!(" {} services ", listed.len())),
    );
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}
