//! Splash screen rendering with ASCII art logo

use crate::state::SplashState;
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LOGO: [&str; 6] = [
    "███████╗███████╗██╗   ██╗██╗███████╗",
    "██╔════╝██╔════╝██║   ██║██║██╔════╝",
    "███████╗█████╗  ██║   ██║██║███████╗",
    "╚════██║██╔══╝  ╚██╗ ██╔╝██║╚════██║",
    "███████║███████╗ ╚████╔╝ ██║███████║",
    "╚══════╝╚══════╝  ╚═══╝  ╚═╝╚══════╝",
];

const TAGLINE: &str = "Papua New Guinea government services";

fn logo_lines(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = LOGO
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(palette.accent))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        TAGLINE,
        Style::default().fg(palette.muted),
    )));
    lines
}

/// Draw the splash screen
pub fn draw(frame: &mut Frame, area: Rect, splash_state: &SplashState, palette: &Palette) {
    let lines = logo_lines(palette);
    let logo_height = lines.len() as u16;
    let logo_width = TAGLINE.len() as u16;

    let base_y = area.y as i32 + (area.height.saturating_sub(logo_height)) as i32 / 2;
    let y_pos = base_y - splash_state.scroll_offset as i32;
    let x = area.x + (area.width.saturating_sub(logo_width)) / 2;

    // Rows already pushed above the top edge
    let lines_off_top = if y_pos < 0 { (-y_pos) as usize } else { 0 };
    if lines_off_top >= lines.len() {
        return;
    }

    let visible: Vec<Line> = lines.into_iter().skip(lines_off_top).collect();
    let visible_height = visible.len() as u16;
    let render_y = if y_pos < 0 { area.y } else { y_pos as u16 };

    let logo_area = Rect {
        x,
        y: render_y,
        width: logo_width.min(area.width),
        height: visible_height.min(area.height.saturating_sub(render_y.saturating_sub(area.y))),
    };
    frame.render_widget(Paragraph::new(visible), logo_area);

    if splash_state.scroll_offset < 1.0 && area.height > 2 {
        let hint = "Press any key to skip";
        let hint_area = Rect {
            x: area.x + (area.width.saturating_sub(hint.len() as u16)) / 2,
            y: area.y + area.height - 2,
            width: (hint.len() as u16).min(area.width),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(palette.muted))),
            hint_area,
        );
    }
}
