//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use crate::ui::theme::Palette;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
    Frame,
};

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str, queued: usize, palette: &Palette) {
    let key = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let mut hint = vec![
        Span::raw("Press "),
        Span::styled("Enter", key),
        Span::raw(" or "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ];
    if queued > 0 {
        hint.push(Span::styled(
            format!("  (+{queued} more)"),
            Style::default().fg(palette.muted),
        ));
    }

    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            color: palette.failure,
            message: error_message,
            body: Vec::new(),
            hint: Some(hint),
            max_width: 60,
        },
        palette,
    );
}
