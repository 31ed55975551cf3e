//! Confirmation dialog for leaving a wizard with unsaved answers

use super::base::{render_dialog, DialogConfig};
use crate::ui::theme::Palette;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOption {
    Cancel,
    Discard,
}

impl ConfirmOption {
    pub const ALL: [ConfirmOption; 2] = [ConfirmOption::Cancel, ConfirmOption::Discard];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(ConfirmOption::Cancel)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Cancel => "Keep editing",
            Self::Discard => "Discard application",
        }
    }
}

/// Render the discard confirmation for `title`
pub fn render_confirm_dialog(frame: &mut Frame, title: &str, selected: usize, palette: &Palette) {
    let selected = ConfirmOption::from_index(selected);
    let body = ConfirmOption::ALL
        .iter()
        .map(|option| {
            let is_selected = *option == selected;
            let prefix = if is_selected { "▸ " } else { "  " };
            let color = match option {
                ConfirmOption::Cancel => palette.text,
                ConfirmOption::Discard => palette.failure,
            };
            let style = if is_selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.muted)
            };
            Line::from(Span::styled(format!("{prefix}{}", option.label()), style))
        })
        .collect();

    let key = Style::default().fg(palette.accent);
    let muted = Style::default().fg(palette.muted);
    let hint = vec![
        Span::styled("↑↓", key),
        Span::styled(" select  ", muted),
        Span::styled("Enter", key),
        Span::styled(" confirm  ", muted),
        Span::styled("Esc", key),
        Span::styled(" keep editing", muted),
    ];

    let message = format!("Leave {title}? The answers you entered will be lost.");
    render_dialog(
        frame,
        DialogConfig {
            title: "Discard application",
            color: palette.failure,
            message: &message,
            body,
            hint: Some(hint),
            max_width: 56,
        },
        palette,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_index_means_cancel() {
        assert_eq!(ConfirmOption::from_index(1), ConfirmOption::Discard);
        assert_eq!(ConfirmOption::from_index(7), ConfirmOption::Cancel);
    }
}
