//! Settings view

use crate::app::App;
use crate::config::ThemePreference;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let config = &app.config;
    let current = config.theme();

    let mut theme_spans = vec![Span::styled("Theme      ", Style::default().fg(palette.muted))];
    for theme in [ThemePreference::Light, ThemePreference::Dark, ThemePreference::System] {
        let style = if theme == current {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(palette.muted)
        };
        theme_spans.push(Span::styled(format!(" {} ", theme.label()), style));
        theme_spans.push(Span::raw(" "));
    }

    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<11}"), Style::default().fg(palette.muted)),
            Span::styled(value, Style::default().fg(palette.text)),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            "Settings",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(theme_spans),
        Line::from(""),
        row(
            "Timeout",
            format!("{} s per verification", config.verification_timeout().as_secs()),
        ),
        row(
            "Delay",
            format!("{} ms simulated service delay", config.simulated_delay().as_millis()),
        ),
        row(
            "Records",
            format!("{:.0}% of searches find an existing record", config.record_match_rate() * 100.0),
        ),
        row(
            "Face match",
            format!("{:.0}% of captures match", config.face_match_rate() * 100.0),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Only the theme can be changed here; edit the config file for the rest.",
            Style::default().fg(palette.muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
