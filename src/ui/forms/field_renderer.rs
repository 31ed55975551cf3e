//! Field rendering utilities for forms

use crate::ui::theme::Palette;
use crate::wizard::{FieldKind, FieldSpec, FieldValue};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field needs, borders included
pub fn field_height(spec: &FieldSpec) -> u16 {
    if spec.is_multiline() {
        5
    } else {
        3
    }
}

/// Draw a wizard field from its spec and current value
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: &FieldValue,
    is_active: bool,
    palette: &Palette,
) {
    let label = if spec.required {
        format!("{} *", spec.label)
    } else {
        spec.label.to_string()
    };

    match spec.kind {
        FieldKind::Choice(options) => {
            let content = choice_line(options, value.as_text(), is_active, palette);
            render_boxed(frame, area, &label, Paragraph::new(content), is_active, palette);
        }
        FieldKind::Flag => {
            let mark = if value.as_flag() { "[x]" } else { "[ ]" };
            let style = if is_active {
                Style::default().fg(palette.accent)
            } else {
                Style::default().fg(palette.text)
            };
            let line = Line::from(vec![
                Span::styled(format!("{mark} "), style.add_modifier(Modifier::BOLD)),
                Span::styled(spec.label, style),
            ]);
            render_boxed(frame, area, "", Paragraph::new(line), is_active, palette);
        }
        FieldKind::Text | FieldKind::Multiline | FieldKind::Number | FieldKind::File => {
            draw_field_with_value(
                frame,
                area,
                &label,
                &value.display_value(),
                is_active,
                spec.is_multiline(),
                palette,
            );
        }
    }
}

/// Draw a free-text field with an explicit display value
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
    palette: &Palette,
) {
    let style = if is_active {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };
    let cursor_style = Style::default().fg(palette.accent);

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };
    let cursor = if is_active { "▌" } else { "" };

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if value.ends_with('\n') || lines.is_empty() {
            lines.push(Line::from(""));
        }
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(cursor, cursor_style));
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value.to_string(), style),
            Span::styled(cursor, cursor_style),
        ]))
    };

    render_boxed(frame, area, label, content, is_active, palette);
}

fn choice_line<'a>(
    options: &'a [&'a str],
    selected: &str,
    is_active: bool,
    palette: &Palette,
) -> Line<'a> {
    let mut spans = Vec::new();
    if is_active {
        spans.push(Span::styled("◂ ", Style::default().fg(palette.accent)));
    }
    for (i, option) in options.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if *option == selected {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(*option, style));
    }
    if is_active {
        spans.push(Span::styled(" ▸", Style::default().fg(palette.accent)));
    }
    Line::from(spans)
}

fn render_boxed(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    content: Paragraph,
    is_active: bool,
    palette: &Palette,
) {
    let border_style = if is_active {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if !label.is_empty() {
        block = block.title(format!(" {label} "));
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}
