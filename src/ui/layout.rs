//! Layout components (header, sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{SidebarItem, View};
use crate::wizard::StepKind;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the navigation sidebar
pub const SIDEBAR_WIDTH: u16 = 20;

/// Regions of the main screen
pub struct ScreenAreas {
    pub header: Rect,
    pub sidebar: Rect,
    pub main: Rect,
    pub status: Rect,
}

/// Split the screen into header, sidebar, content and status bar
pub fn create_layout(area: Rect) -> ScreenAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    ScreenAreas {
        header: rows[0],
        sidebar: columns[0],
        main: columns[1],
        status: rows[2],
    }
}

/// Draw the portal name and the credential badges
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let title = Line::from(vec![
        Span::styled(
            " SEVIS Portal ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("· {}", app.state.current_view.title()),
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);

    let mut badges = Vec::new();
    match app.session.user() {
        Some(user) => badges.push(Span::styled(
            format!("● {user} "),
            Style::default().fg(palette.success),
        )),
        None => badges.push(Span::styled(
            "○ Not signed in ",
            Style::default().fg(palette.muted),
        )),
    }
    if app.session.is_elevated() {
        badges.push(Span::styled(
            "🛡 SEVIS Pass ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(badges)).alignment(Alignment::Right),
        area,
    );
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(SidebarItem::ALL.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let active = SidebarItem::for_view(app.state.current_view);
    for (idx, item) in SidebarItem::ALL.iter().enumerate() {
        let label = match item {
            SidebarItem::SignIn if app.session.is_authenticated() => "Account",
            SidebarItem::Home => "Home",
            SidebarItem::Services => "Services",
            SidebarItem::SignIn => "Sign in",
            SidebarItem::Settings => "Settings",
        };
        render_sidebar_button(
            frame,
            chunks[idx + 1],
            item.key(),
            label,
            active == Some(*item),
            &palette,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let mut spans = vec![Span::raw(" ")];

    spans.push(Span::styled(view_hints(app), Style::default().fg(palette.bar_fg)));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            msg.as_str(),
            Style::default()
                .fg(palette.info)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.bar_bg));
    frame.render_widget(status, area);

    let quit_hint = " ^C^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(palette.bar_bg).fg(palette.bar_fg));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view
fn view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Splash => "Press any key to skip".to_string(),
        View::Home => "j/k:nav  Enter:open  h/s/l/,:sidebar".to_string(),
        View::SignIn if app.session.is_authenticated() => "Enter:sign out  Esc:back".to_string(),
        View::SignIn => "Tab:next  Enter:sign in  Esc:back".to_string(),
        View::Services => "j/k:nav  Enter:apply  f:filter  Esc:back".to_string(),
        View::Wizard => wizard_hints(app),
        View::Blocked => "j/k:select  Enter:choose  Esc:back".to_string(),
        View::Confirmation => "y:copy ref  n:new application  Enter:continue  Esc:services"
            .to_string(),
        View::Settings => "Enter/t:theme  Esc:back".to_string(),
    }
}

fn wizard_hints(app: &App) -> String {
    let Some(wizard) = app.wizard.as_ref() else {
        return "Esc:back".to_string();
    };
    if wizard.is_stage_pending() {
        return "Esc:cancel verification".to_string();
    }
    match &wizard.current_step().kind {
        StepKind::Menu { .. } => "j/k:choose  Enter:select  PgUp:back  Esc:leave".to_string(),
        StepKind::Outcome { retry: Some(_), .. } => {
            "r:retry  Enter:continue  PgUp:back  Esc:leave".to_string()
        }
        _ if wizard.can_submit() => {
            format!("Tab:next field  {SUBMIT_SHORTCUT}:submit  PgUp:back  Esc:leave")
        }
        _ if wizard.is_final_step() => "Tab:next field  Space:tick  PgUp:back  Esc:leave".to_string(),
        _ if wizard.can_advance() => {
            "Tab:next field  ←→:choose  Enter:next step  PgUp:back  Esc:leave".to_string()
        }
        _ => "Tab:next field  ←→:choose  PgUp:back  Esc:leave".to_string(),
    }
}
